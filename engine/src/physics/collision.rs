//! Grid collision resolution
//!
//! Everything here reads the immutable maze grid, so the same resolver answers
//! both the agents' movement predicate and the player's per-tick check.
//!
//! # Player check
//!
//! The player's X/Z is floored to a tile:
//! - `Goal` wins and ends evaluation for the tick
//! - `Wall`, `Window` or outside the grid is a wall collision
//! - otherwise every agent closer than `contact_radius` is an agent collision
//!
//! # Agent footprint
//!
//! Five samples: the centre plus `±half_extent` along X and Z. Any sample on an
//! obstacle or outside the grid blocks the move. Diagonal corner penetration
//! is not detected.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::world::{GridMetrics, GridPos, MazeGrid, Tile};

/// Message shown after walking into a wall or window.
pub const WALL_MESSAGE: &str = "YOU COLLIDED WITH WALL! TRY AGAIN!";

/// Message shown after touching a patrol agent.
pub const AGENT_MESSAGE: &str = "YOU COLLIDED WITH A SOLDIER! TRY AGAIN!";

/// Collision tunables.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionSettings {
    /// Half side of the agent's square footprint
    pub footprint_half_extent: f32,
    /// Player/agent contact distance (strict)
    pub contact_radius: f32,
    /// How long the collision message stays on screen
    pub message_seconds: f32,
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self {
            footprint_half_extent: 0.30,
            contact_radius: 0.30,
            message_seconds: 2.0,
        }
    }
}

/// Classification of the tile under a world point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileContact {
    Clear,
    Goal,
    Obstacle,
    OutOfBounds,
}

impl TileContact {
    pub fn is_blocking(self) -> bool {
        matches!(self, TileContact::Obstacle | TileContact::OutOfBounds)
    }
}

/// What the player hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionKind {
    Wall { tile: GridPos },
    Agent { index: usize },
}

/// A collision to report to the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionEvent {
    pub kind: CollisionKind,
    pub message: &'static str,
    pub display_seconds: f32,
}

/// Result of one player evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Verdict {
    Clear,
    Won,
    Collided(CollisionEvent),
}

/// Stateless collision queries over a maze grid.
#[derive(Clone, Copy, Debug)]
pub struct CollisionResolver<'a> {
    grid: &'a MazeGrid,
    metrics: GridMetrics,
    settings: CollisionSettings,
}

impl<'a> CollisionResolver<'a> {
    pub fn new(grid: &'a MazeGrid, metrics: GridMetrics, settings: CollisionSettings) -> Self {
        Self {
            grid,
            metrics,
            settings,
        }
    }

    pub fn settings(&self) -> &CollisionSettings {
        &self.settings
    }

    /// Tile under a world point.
    #[inline]
    pub fn tile_at_world(&self, position: Vec3) -> GridPos {
        self.metrics.tile_at(position)
    }

    /// Classify the tile under a world point.
    pub fn classify(&self, position: Vec3) -> TileContact {
        match self.grid.get(self.tile_at_world(position)) {
            None => TileContact::OutOfBounds,
            Some(Tile::Goal) => TileContact::Goal,
            Some(tile) if tile.is_obstacle() => TileContact::Obstacle,
            Some(_) => TileContact::Clear,
        }
    }

    /// Five-point footprint test used as the agents' movement predicate.
    pub fn footprint_blocked(&self, center: Vec3) -> bool {
        let h = self.settings.footprint_half_extent;
        [
            center,
            center + Vec3::new(h, 0.0, 0.0),
            center - Vec3::new(h, 0.0, 0.0),
            center + Vec3::new(0.0, 0.0, h),
            center - Vec3::new(0.0, 0.0, h),
        ]
        .into_iter()
        .any(|point| self.grid.blocks(self.tile_at_world(point)))
    }

    /// Index of the first agent strictly inside the contact radius.
    pub fn agent_contact<I>(&self, player: Vec3, agents: I) -> Option<usize>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let radius_sq = self.settings.contact_radius * self.settings.contact_radius;
        agents
            .into_iter()
            .position(|agent| player.distance_squared(agent) < radius_sq)
    }

    /// Full per-tick player evaluation.
    pub fn evaluate<I>(&self, player: Vec3, agents: I) -> Verdict
    where
        I: IntoIterator<Item = Vec3>,
    {
        let tile = self.tile_at_world(player);
        match self.classify(player) {
            TileContact::Goal => return Verdict::Won,
            contact if contact.is_blocking() => {
                return Verdict::Collided(self.event(CollisionKind::Wall { tile }, WALL_MESSAGE));
            }
            _ => {}
        }

        match self.agent_contact(player, agents) {
            Some(index) => {
                Verdict::Collided(self.event(CollisionKind::Agent { index }, AGENT_MESSAGE))
            }
            None => Verdict::Clear,
        }
    }

    fn event(&self, kind: CollisionKind, message: &'static str) -> CollisionEvent {
        CollisionEvent {
            kind,
            message,
            display_seconds: self.settings.message_seconds,
        }
    }
}
