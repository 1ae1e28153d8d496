//! Player Module
//!
//! Provides the grid-walking player rig.
//!
//! # Components
//!
//! - [`PlayerRig`] - position + facing angle, facing-relative stepping
//! - [`PlayerSettings`] - speed, turn sensitivity, spawn facing, model scale
//! - [`SpawnPoint`] - transform the rig resets to after a collision

pub mod rig;

pub use rig::{PlayerRig, PlayerSettings, SpawnPoint};
