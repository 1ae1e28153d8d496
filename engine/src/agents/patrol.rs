//! Patrol agents.
//!
//! An agent walks in a straight cardinal line at a fixed speed. Before each
//! move it asks a caller-supplied predicate whether the candidate position is
//! blocked; if so it stays put and picks a new random cardinal direction.

use glam::{Mat4, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One of the four horizontal axes an agent may walk along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cardinal {
    PosX,
    NegX,
    PosZ,
    NegZ,
}

impl Cardinal {
    pub const ALL: [Cardinal; 4] = [Cardinal::PosX, Cardinal::NegX, Cardinal::PosZ, Cardinal::NegZ];

    /// Unit vector on the floor plane.
    pub fn vector(self) -> Vec3 {
        match self {
            Cardinal::PosX => Vec3::X,
            Cardinal::NegX => Vec3::NEG_X,
            Cardinal::PosZ => Vec3::Z,
            Cardinal::NegZ => Vec3::NEG_Z,
        }
    }

    /// Uniform choice among the four directions.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Speed range for freshly spawned agents.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// Inclusive lower bound (units per second)
    pub speed_min: f32,
    /// Exclusive upper bound (units per second)
    pub speed_max: f32,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            speed_min: 0.8,
            speed_max: 3.0,
        }
    }
}

/// Outcome of one [`PatrolAgent::advance`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AgentStep {
    /// Candidate position was free and committed
    Moved,
    /// Candidate was blocked; position kept, direction re-rolled
    Blocked { new_direction: Cardinal },
}

/// A patrolling non-player unit.
#[derive(Clone, Debug)]
pub struct PatrolAgent {
    position: Vec3,
    direction: Cardinal,
    speed: f32,
}

impl PatrolAgent {
    /// Spawn at `position` with a random direction and a random speed drawn
    /// from `settings`.
    pub fn spawn<R: Rng + ?Sized>(position: Vec3, settings: &AgentSettings, rng: &mut R) -> Self {
        let speed = if settings.speed_max > settings.speed_min {
            rng.gen_range(settings.speed_min..settings.speed_max)
        } else {
            settings.speed_min
        };
        Self::new(position, Cardinal::random(rng), speed)
    }

    pub fn new(position: Vec3, direction: Cardinal, speed: f32) -> Self {
        debug_assert!(speed >= 0.0, "agent speed must be non-negative");
        Self {
            position,
            direction,
            speed,
        }
    }

    #[inline]
    pub fn get_position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn get_direction(&self) -> Cardinal {
        self.direction
    }

    #[inline]
    pub fn get_speed(&self) -> f32 {
        self.speed
    }

    /// Where the agent would be after `delta_time` seconds.
    pub fn candidate(&self, delta_time: f32) -> Vec3 {
        self.position + self.direction.vector() * self.speed * delta_time
    }

    /// Advance one tick.
    ///
    /// `blocked` is evaluated once on the candidate position. A blocked move
    /// leaves the position untouched and re-rolls the direction; speed never
    /// changes after spawn.
    pub fn advance<R, F>(&mut self, delta_time: f32, rng: &mut R, blocked: F) -> AgentStep
    where
        R: Rng + ?Sized,
        F: FnOnce(Vec3) -> bool,
    {
        let candidate = self.candidate(delta_time);
        if blocked(candidate) {
            self.direction = Cardinal::random(rng);
            tracing::trace!(
                position = ?self.position,
                direction = ?self.direction,
                "agent re-rolled direction"
            );
            return AgentStep::Blocked {
                new_direction: self.direction,
            };
        }
        self.position = candidate;
        AgentStep::Moved
    }

    /// Model matrix: translation plus a yaw that faces the walking direction.
    pub fn model_transform(&self) -> Mat4 {
        let heading = self.direction.vector();
        Mat4::from_translation(self.position) * Mat4::from_rotation_y(heading.x.atan2(heading.z))
    }
}
