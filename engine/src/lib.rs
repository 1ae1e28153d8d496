//! Maze Runner Engine Library
//!
//! Gameplay core of a first/third-person maze game. A fixed tile grid drives
//! static placements, a grid-walking player, a Follow/Ghost camera, patrol
//! agents and tile collision. Rendering, windows and UI widgets are external
//! consumers of the transforms and HUD state exposed here.
//!
//! # Modules
//!
//! - [`world`] - Maze grid, authoring format, static placements
//! - [`player`] - Player rig (position + facing)
//! - [`camera`] - Follow/Ghost x first/third person camera state machine
//! - [`agents`] - Patrol agents
//! - [`physics`] - Grid collision resolver
//! - [`input`] - Platform-agnostic key state and per-tick input snapshots
//! - [`game`] - Config, world assembly, session tick, HUD view
//!
//! # Example
//!
//! ```ignore
//! use maze_runner_engine::game::{GameConfig, GameSession, HudView, MazeWorld};
//! use maze_runner_engine::input::{KeyCode, KeyboardState};
//!
//! let config = GameConfig::default();
//! let world = MazeWorld::builtin(&config)?;
//! let mut session = GameSession::new(world, config);
//!
//! let mut keyboard = KeyboardState::new();
//! keyboard.handle_key(KeyCode::Enter, true);
//! keyboard.handle_key(KeyCode::W, true);
//!
//! let report = session.tick(&keyboard.snapshot(), 1.0 / 60.0);
//! println!("{}", HudView::from_session(&session));
//! ```

pub mod agents;
pub mod camera;
pub mod input;
pub mod physics;
pub mod player;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export world types for convenience
pub use world::{GridPos, MazeError, MazeGrid, Tile};
// Re-export commonly used input types
pub use input::{InputSnapshot, KeyCode, KeyboardState};
// Re-export entity types
pub use agents::PatrolAgent;
pub use camera::CameraController;
pub use player::PlayerRig;
