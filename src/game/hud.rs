//! HUD View
//!
//! Read-only presentation state pulled from a session once per frame. The
//! widgets that draw it live outside the game core.

use std::fmt;

use super::session::{GameSession, SessionPhase};

/// Format the game clock as `ELAPSED TIME: MM:SS`.
pub fn format_clock(seconds: f32) -> String {
    let total = seconds.max(0.0) as u32;
    format!("ELAPSED TIME: {:02}:{:02}", total / 60, total % 60)
}

/// Snapshot of everything the UI shows.
#[derive(Clone, Debug, PartialEq)]
pub struct HudView {
    pub phase: SessionPhase,
    pub elapsed: f32,
    pub won: bool,
    pub message: Option<&'static str>,
    /// Whole seconds left in the ghost flight, rounded up
    pub ghost_seconds: Option<u32>,
    /// View buttons are only usable while the camera follows the player
    pub view_toggle_enabled: bool,
}

impl HudView {
    pub fn from_session(session: &GameSession) -> Self {
        let state = session.state();
        Self {
            phase: state.phase,
            elapsed: state.elapsed,
            won: state.is_won(),
            message: state.message.map(|m| m.text),
            ghost_seconds: state.ghost_remaining.map(|r| r.max(0.0).ceil() as u32),
            view_toggle_enabled: state.is_running() && !session.camera().is_ghost(),
        }
    }

    pub fn clock(&self) -> String {
        format_clock(self.elapsed)
    }
}

impl fmt::Display for HudView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.clock())?;
        match self.phase {
            SessionPhase::Ready => write!(f, " | PRESS START")?,
            SessionPhase::Won => write!(f, " | YOU WON!")?,
            SessionPhase::Running => {}
        }
        if let Some(seconds) = self.ghost_seconds {
            write!(f, " | GHOST MODE: {seconds}s")?;
        }
        if let Some(message) = self.message {
            write!(f, " | {message}")?;
        }
        Ok(())
    }
}
