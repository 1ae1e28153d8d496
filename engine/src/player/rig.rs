//! Player Rig
//!
//! Grid-walking player: a position on the floor plane and a horizontal facing
//! angle. Movement is a fixed step per tick along the facing-relative axes.
//!
//! # Conventions
//!
//! - forward = `(-cos a, 0, sin a)`
//! - right   = `(-sin a, 0, -cos a)` (= forward x up)
//!
//! At `a = 0` the rig faces -X and its right hand points to -Z.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::input::MovementKeys;

/// Tunables for the player rig.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Distance moved per tick while a movement key is held
    pub move_speed: f32,
    /// Radians turned per unit of yaw input
    pub turn_sensitivity: f32,
    /// Facing angle applied at spawn and on every reset
    pub spawn_facing: f32,
    /// Uniform scale of the player model
    pub model_scale: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            move_speed: 0.05,
            turn_sensitivity: 0.05,
            spawn_facing: 0.0,
            model_scale: 0.035,
        }
    }
}

/// Spawn transform the rig returns to after a collision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnPoint {
    pub position: Vec3,
    pub facing: f32,
}

/// The player's physical state.
#[derive(Clone, Debug)]
pub struct PlayerRig {
    position: Vec3,
    facing: f32,
    settings: PlayerSettings,
}

impl PlayerRig {
    pub fn new(spawn: SpawnPoint, settings: PlayerSettings) -> Self {
        Self {
            position: spawn.position,
            facing: spawn.facing,
            settings,
        }
    }

    #[inline]
    pub fn get_position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Facing angle in radians (unbounded).
    #[inline]
    pub fn get_facing(&self) -> f32 {
        self.facing
    }

    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    /// Horizontal unit vector the rig is facing.
    #[inline]
    pub fn get_forward(&self) -> Vec3 {
        Vec3::new(-self.facing.cos(), 0.0, self.facing.sin())
    }

    /// Horizontal unit vector to the rig's right.
    #[inline]
    pub fn get_right(&self) -> Vec3 {
        Vec3::new(-self.facing.sin(), 0.0, -self.facing.cos())
    }

    /// Step along the held movement keys.
    ///
    /// Forward/back and left/right contributions are summed and normalized, so
    /// diagonal movement is no faster than straight movement. Returns the
    /// applied displacement (zero when no key contributes).
    pub fn move_by(&mut self, movement: &MovementKeys) -> Vec3 {
        let direction =
            self.get_forward() * movement.forward_axis() + self.get_right() * movement.right_axis();
        if direction.length_squared() == 0.0 {
            return Vec3::ZERO;
        }
        let step = direction.normalize() * self.settings.move_speed;
        self.position += step;
        step
    }

    /// Turn by `yaw_delta` input units. Positive input turns right.
    ///
    /// No clamping: the rig may spin freely.
    pub fn rotate(&mut self, yaw_delta: f32) {
        self.facing -= yaw_delta * self.settings.turn_sensitivity;
    }

    /// Overwrite position and facing with the spawn transform.
    pub fn reset_to(&mut self, spawn: SpawnPoint) {
        self.position = spawn.position;
        self.facing = spawn.facing;
    }

    /// Model matrix for the rendering consumer.
    pub fn model_transform(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_y(self.facing)
            * Mat4::from_scale(Vec3::splat(self.settings.model_scale))
    }
}
