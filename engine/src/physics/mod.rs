//! Physics module
//!
//! Cheap deterministic collision against the maze grid. No continuous-time
//! integration and no arbitrary shapes: tiles, a five-point footprint and a
//! contact radius.
//!
//! # Unit System
//!
//! **1 unit = 1 tile** at the default cell size.
//!
//! # Submodules
//!
//! - [`collision`] - tile classification, footprint predicate, player verdicts

pub mod collision;

pub use collision::{
    AGENT_MESSAGE, CollisionEvent, CollisionKind, CollisionResolver, CollisionSettings,
    TileContact, Verdict, WALL_MESSAGE,
};
