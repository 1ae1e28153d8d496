//! Game Module
//!
//! Contains the maze game systems that build on top of the engine: the
//! loaded world, configuration, the per-tick session and its HUD view.

pub mod config;
pub mod hud;
pub mod session;
pub mod world;

pub use config::{ConfigError, GameConfig, SessionSettings};
pub use hud::{HudView, format_clock};
pub use session::{
    ActiveMessage, GameSession, RenderFrame, SessionEvent, SessionPhase, SessionState, TickReport,
};
pub use world::MazeWorld;
