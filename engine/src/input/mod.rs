//! Input Module
//!
//! Platform-agnostic input handling. Key events are accumulated in a
//! [`KeyboardState`] between ticks; once per tick the game takes an immutable
//! [`InputSnapshot`] and passes it down the update, so no system reads live
//! device state.
//!
//! # Example
//!
//! ```rust,ignore
//! use maze_runner_engine::input::{KeyboardState, KeyCode};
//!
//! let mut keyboard = KeyboardState::new();
//! keyboard.handle_key(KeyCode::W, true);
//!
//! let input = keyboard.snapshot();
//! session.tick(&input, delta_time);
//! ```

pub mod bindings;
pub mod keyboard;

pub use bindings::{InputAction, KeyBindings};
pub use keyboard::{KeyCode, KeyboardState, LookKeys, MovementKeys};

/// One-shot commands raised by keys or UI buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Commands {
    pub start: bool,
    pub toggle_ghost: bool,
    pub first_person: bool,
    pub third_person: bool,
}

impl Commands {
    pub fn any(&self) -> bool {
        self.start || self.toggle_ghost || self.first_person || self.third_person
    }
}

/// Everything the simulation reads from input during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub movement: MovementKeys,
    pub look: LookKeys,
    pub commands: Commands,
}

impl InputSnapshot {
    /// No keys held, no commands.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Only the given commands.
    pub fn with_commands(commands: Commands) -> Self {
        Self {
            commands,
            ..Default::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.movement.any_pressed() || self.look.any_pressed() || self.commands.any()
    }
}
