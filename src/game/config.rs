//! Game Configuration
//!
//! Aggregates every engine settings struct into one JSON-loadable value.
//! `Default` returns the values the game ships with; a config file only needs
//! to name the fields it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::agents::AgentSettings;
use crate::camera::CameraSettings;
use crate::physics::CollisionSettings;
use crate::player::PlayerSettings;
use crate::world::PlacementSettings;

/// Errors that can occur while loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Session timing and randomness.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Seconds a ghost flight lasts before the camera snaps back
    pub ghost_duration: f32,
    /// Seconds added to the elapsed clock for each ghost flight
    pub ghost_penalty: f32,
    /// Seed for agent spawn and re-roll randomness
    pub rng_seed: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ghost_duration: 15.0,
            ghost_penalty: 30.0,
            rng_seed: 0x6d61_7a65,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub placement: PlacementSettings,
    pub player: PlayerSettings,
    pub camera: CameraSettings,
    pub agents: AgentSettings,
    pub collision: CollisionSettings,
    pub session: SessionSettings,
}

impl GameConfig {
    /// Parse a JSON document and reject values the engine cannot run with.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        tracing::info!(path = %path.display(), "loaded game config");
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the ranges every subsystem assumes.
    ///
    /// Lengths and durations must be positive; agent speeds must form a
    /// non-negative range; the ghost penalty may be zero but not negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("placement.cell_size", self.placement.cell_size)?;
        positive("collision.footprint_half_extent", self.collision.footprint_half_extent)?;
        positive("collision.contact_radius", self.collision.contact_radius)?;
        positive("collision.message_seconds", self.collision.message_seconds)?;
        positive("session.ghost_duration", self.session.ghost_duration)?;

        let agents = &self.agents;
        if agents.speed_min.is_nan() || agents.speed_min < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "agents.speed_min must be non-negative, got {}",
                agents.speed_min
            )));
        }
        if agents.speed_max.is_nan() || agents.speed_max < agents.speed_min {
            return Err(ConfigError::Invalid(format!(
                "agents.speed_max ({}) is below agents.speed_min ({})",
                agents.speed_max, agents.speed_min
            )));
        }
        if self.session.ghost_penalty.is_nan() || self.session.ghost_penalty < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "session.ghost_penalty must be non-negative, got {}",
                self.session.ghost_penalty
            )));
        }
        Ok(())
    }
}

// NaN fails the comparison and is rejected with the rest
fn positive(field: &str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{field} must be positive, got {value}")))
    }
}
