//! Agents Module
//!
//! Patrol units that wander the maze along cardinal lines and turn at random
//! whenever the next step would be blocked.

pub mod patrol;

pub use patrol::{AgentSettings, AgentStep, Cardinal, PatrolAgent};
