//! Camera Controller Module
//!
//! Two-axis camera state machine: a control [`CameraMode`] (player-locked
//! `Follow` or free-fly `Ghost`) and a framing [`ViewMode`] (first or third
//! person). The framing only matters while following.
//!
//! ## Follow
//!
//! Position is derived from the [`PlayerRig`] every tick and the camera always
//! looks back at the player's head, so one formula frames both views:
//!
//! - first person: `head + forward * first_person_offset`
//! - third person: `player + up * third_person_height - forward * third_person_distance`
//!
//! `direction` is the horizontal projection of `forward`, so walking never
//! drives the camera into the floor or the sky.
//!
//! ## Ghost
//!
//! Yaw/pitch and position are driven straight from input, and
//! `direction == forward` (full 3-DOF fly). Entering Ghost snapshots the
//! follow state and leaving restores it bit-for-bit.
//!
//! This is window-system agnostic - it only manages camera state and math.

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::input::MovementKeys;
use crate::player::PlayerRig;

/// Who drives the camera.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum CameraMode {
    /// Locked to the player rig
    #[default]
    Follow,
    /// Detached free-fly camera
    Ghost,
}

/// How the player is framed while following.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum ViewMode {
    /// Eye just behind the player's head
    FirstPerson,
    /// Above and behind the player
    #[default]
    ThirdPerson,
}

/// Follow state captured when entering Ghost.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CameraSnapshot {
    pub position: Vec3,
    pub direction: Vec3,
    pub forward: Vec3,
}

/// Camera tunables.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Height of the look target above the player's feet
    pub head_height: f32,
    /// Signed distance from the head along the player's facing (first person)
    pub first_person_offset: f32,
    /// Height of the eye above the player's feet (third person)
    pub third_person_height: f32,
    /// Distance behind the player (third person)
    pub third_person_distance: f32,
    /// Radians per unit of look input (ghost)
    pub look_sensitivity: f32,
    /// Distance flown per tick (ghost)
    pub fly_speed: f32,
    /// Gap kept between |pitch| and π/2
    pub pitch_margin: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            head_height: 0.4,
            first_person_offset: -0.1,
            third_person_height: 1.2,
            third_person_distance: 1.5,
            look_sensitivity: 0.05,
            fly_speed: 0.05,
            pitch_margin: 0.1,
        }
    }
}

/// Default yaw: looking down -Z.
pub const DEFAULT_YAW: f32 = -FRAC_PI_2;

/// Forward axis restored by [`CameraController::reset_direction`].
pub const DEFAULT_DIRECTION: Vec3 = Vec3::NEG_Z;

/// Below this squared length a look vector is treated as degenerate.
const DEGENERATE_EPSILON: f32 = 1e-8;

/// Camera controller state.
///
/// Input handling is done externally and passed in as per-tick values.
#[derive(Clone, Debug)]
pub struct CameraController {
    position: Vec3,
    forward: Vec3,
    direction: Vec3,
    up: Vec3,
    yaw: f32,
    pitch: f32,
    mode: CameraMode,
    view: ViewMode,
    saved: Option<CameraSnapshot>,
    /// Pitch limits (min, max) in radians
    pitch_limits: (f32, f32),
    settings: CameraSettings,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}

impl CameraController {
    pub fn new(settings: CameraSettings) -> Self {
        let limit = FRAC_PI_2 - settings.pitch_margin;
        Self {
            position: Vec3::ZERO,
            forward: DEFAULT_DIRECTION,
            direction: DEFAULT_DIRECTION,
            up: Vec3::Y,
            yaw: DEFAULT_YAW,
            pitch: 0.0,
            mode: CameraMode::Follow,
            view: ViewMode::ThirdPerson,
            saved: None,
            pitch_limits: (-limit, limit),
            settings,
        }
    }

    /// Build a camera already framing `player`.
    pub fn following(player: &PlayerRig, settings: CameraSettings) -> Self {
        let mut camera = Self::new(settings);
        camera.follow(player);
        camera
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn get_position(&self) -> Vec3 {
        self.position
    }

    /// Look vector (unit length).
    #[inline]
    pub fn get_forward(&self) -> Vec3 {
        self.forward
    }

    /// Movement vector: flattened `forward` in Follow, `forward` in Ghost.
    #[inline]
    pub fn get_direction(&self) -> Vec3 {
        self.direction
    }

    #[inline]
    pub fn get_up(&self) -> Vec3 {
        self.up
    }

    /// Strafe axis, `direction x up`.
    pub fn get_right(&self) -> Vec3 {
        self.direction.cross(self.up).normalize_or_zero()
    }

    #[inline]
    pub fn get_yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    pub fn get_pitch(&self) -> f32 {
        self.pitch
    }

    pub fn get_pitch_limits(&self) -> (f32, f32) {
        self.pitch_limits
    }

    #[inline]
    pub fn get_mode(&self) -> CameraMode {
        self.mode
    }

    #[inline]
    pub fn get_view(&self) -> ViewMode {
        self.view
    }

    pub fn is_ghost(&self) -> bool {
        self.mode == CameraMode::Ghost
    }

    pub fn is_first_person(&self) -> bool {
        self.view == ViewMode::FirstPerson
    }

    /// Follow state saved on the last Follow -> Ghost transition.
    pub fn get_saved(&self) -> Option<CameraSnapshot> {
        self.saved
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Right-handed view matrix for the rendering consumer.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward, self.up)
    }

    // ========================================================================
    // Follow mode
    // ========================================================================

    /// Re-derive the camera from the player rig. Does nothing in Ghost.
    pub fn follow(&mut self, player: &PlayerRig) {
        if self.mode == CameraMode::Ghost {
            return;
        }

        let feet = player.get_position();
        let facing = player.get_forward();
        let head = feet + self.up * self.settings.head_height;

        self.position = match self.view {
            ViewMode::FirstPerson => head + facing * self.settings.first_person_offset,
            ViewMode::ThirdPerson => {
                feet + self.up * self.settings.third_person_height
                    - facing * self.settings.third_person_distance
            }
        };

        let look = head - self.position;
        self.forward = if look.length_squared() > DEGENERATE_EPSILON {
            look.normalize()
        } else {
            facing
        };

        let flat = Vec3::new(self.forward.x, 0.0, self.forward.z);
        self.direction = if flat.length_squared() > DEGENERATE_EPSILON {
            flat.normalize()
        } else {
            facing
        };

        // Keep yaw/pitch in sync so Ghost starts from the current view
        self.yaw = self.forward.z.atan2(self.forward.x);
        self.pitch = self
            .forward
            .y
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(self.pitch_limits.0, self.pitch_limits.1);
    }

    /// Switch framing. Rejected (returns `false`) while in Ghost.
    pub fn set_view(&mut self, view: ViewMode) -> bool {
        if self.mode == CameraMode::Ghost {
            return false;
        }
        self.view = view;
        true
    }

    /// Force `direction` back to the default forward axis.
    pub fn reset_direction(&mut self) {
        self.yaw = DEFAULT_YAW;
        self.pitch = 0.0;
        self.direction = DEFAULT_DIRECTION;
        self.forward = DEFAULT_DIRECTION;
    }

    // ========================================================================
    // Mode transitions
    // ========================================================================

    /// Follow -> Ghost. Returns `false` if already in Ghost.
    pub fn enter_ghost(&mut self) -> bool {
        if self.mode == CameraMode::Ghost {
            return false;
        }
        self.saved = Some(CameraSnapshot {
            position: self.position,
            direction: self.direction,
            forward: self.forward,
        });
        self.mode = CameraMode::Ghost;
        self.direction = self.forward;
        tracing::debug!(position = ?self.position, "camera entered ghost mode");
        true
    }

    /// Ghost -> Follow, restoring the snapshot verbatim. Returns `false` if
    /// not in Ghost.
    pub fn exit_ghost(&mut self) -> bool {
        if self.mode != CameraMode::Ghost {
            return false;
        }
        if let Some(saved) = self.saved.take() {
            self.position = saved.position;
            self.direction = saved.direction;
            self.forward = saved.forward;
            self.yaw = saved.forward.z.atan2(saved.forward.x);
            self.pitch = saved
                .forward
                .y
                .clamp(-1.0, 1.0)
                .asin()
                .clamp(self.pitch_limits.0, self.pitch_limits.1);
        }
        self.mode = CameraMode::Follow;
        tracing::debug!(position = ?self.position, "camera left ghost mode");
        true
    }

    // ========================================================================
    // Ghost mode
    // ========================================================================

    /// Apply look input. Only acts in Ghost; in Follow the rig owns facing.
    ///
    /// Pitch is clamped to `pitch_limits`; yaw is unrestricted.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        if self.mode != CameraMode::Ghost {
            return;
        }
        self.yaw += yaw_delta * self.settings.look_sensitivity;
        self.pitch = (self.pitch + pitch_delta * self.settings.look_sensitivity)
            .clamp(self.pitch_limits.0, self.pitch_limits.1);

        self.forward = Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize();
        self.direction = self.forward;
    }

    /// Free-fly one tick. Only acts in Ghost. Returns the applied displacement.
    pub fn fly(&mut self, movement: &MovementKeys) -> Vec3 {
        if self.mode != CameraMode::Ghost {
            return Vec3::ZERO;
        }
        let wish = self.direction * movement.forward_axis()
            + self.get_right() * movement.right_axis()
            + self.up * movement.up_axis();
        if wish.length_squared() == 0.0 {
            return Vec3::ZERO;
        }
        let step = wish.normalize() * self.settings.fly_speed;
        self.position += step;
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{PlayerSettings, SpawnPoint};

    fn player_at(x: f32, z: f32, facing: f32) -> PlayerRig {
        PlayerRig::new(
            SpawnPoint {
                position: Vec3::new(x, 0.0, z),
                facing,
            },
            PlayerSettings::default(),
        )
    }

    #[test]
    fn test_default_camera() {
        let camera = CameraController::default();
        assert_eq!(camera.get_mode(), CameraMode::Follow);
        assert_eq!(camera.get_view(), ViewMode::ThirdPerson);
        assert_eq!(camera.get_yaw(), DEFAULT_YAW);
        assert!(camera.get_saved().is_none());
    }

    #[test]
    fn test_pitch_limits_from_margin() {
        let camera = CameraController::default();
        let (min, max) = camera.get_pitch_limits();
        assert!((max - (FRAC_PI_2 - 0.1)).abs() < 1e-6);
        assert_eq!(min, -max);
    }

    #[test]
    fn test_third_person_behind_and_above() {
        let player = player_at(5.5, 5.5, 0.0);
        let camera = CameraController::following(&player, CameraSettings::default());

        // facing 0 looks down -X, so "behind" is +X
        assert!(camera.get_position().x > 5.5);
        assert!(camera.get_position().y > 0.4);
        assert!(camera.get_forward().x < 0.0);
        assert!(camera.get_forward().y < 0.0);
    }

    #[test]
    fn test_first_person_looks_along_facing() {
        let player = player_at(2.5, 3.5, 0.7);
        let mut camera = CameraController::default();
        camera.set_view(ViewMode::FirstPerson);
        camera.follow(&player);

        let expected = player.get_forward();
        assert!((camera.get_forward() - expected).length() < 1e-5);
        assert!((camera.get_position().y - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_follow_direction_is_horizontal() {
        let player = player_at(1.5, 1.5, 1.2);
        let camera = CameraController::following(&player, CameraSettings::default());

        let direction = camera.get_direction();
        assert_eq!(direction.y, 0.0);
        assert!((direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_look_falls_back_to_facing() {
        let settings = CameraSettings {
            first_person_offset: 0.0,
            ..Default::default()
        };
        let player = player_at(1.5, 1.5, 0.0);
        let mut camera = CameraController::new(settings);
        camera.set_view(ViewMode::FirstPerson);
        camera.follow(&player);

        assert_eq!(camera.get_forward(), player.get_forward());
        assert!(camera.get_forward().is_finite());
    }

    #[test]
    fn test_ghost_round_trip_restores_state() {
        let player = player_at(3.5, 7.5, 0.3);
        let mut camera = CameraController::following(&player, CameraSettings::default());
        let position = camera.get_position();
        let direction = camera.get_direction();

        assert!(camera.enter_ghost());
        assert!(camera.exit_ghost());

        assert_eq!(camera.get_position(), position);
        assert_eq!(camera.get_direction(), direction);
        assert_eq!(camera.get_mode(), CameraMode::Follow);
    }

    #[test]
    fn test_ghost_round_trip_after_flying() {
        let player = player_at(3.5, 7.5, 0.3);
        let mut camera = CameraController::following(&player, CameraSettings::default());
        let position = camera.get_position();
        let direction = camera.get_direction();

        camera.enter_ghost();
        let keys = MovementKeys {
            forward: true,
            up: true,
            ..Default::default()
        };
        for _ in 0..20 {
            camera.rotate(1.0, 0.5);
            camera.fly(&keys);
        }
        assert_ne!(camera.get_position(), position);
        camera.exit_ghost();

        assert_eq!(camera.get_position(), position);
        assert_eq!(camera.get_direction(), direction);
    }

    #[test]
    fn test_double_enter_keeps_first_snapshot() {
        let player = player_at(3.5, 7.5, 0.0);
        let mut camera = CameraController::following(&player, CameraSettings::default());
        let position = camera.get_position();

        camera.enter_ghost();
        camera.fly(&MovementKeys {
            up: true,
            ..Default::default()
        });
        assert!(!camera.enter_ghost());
        camera.exit_ghost();

        assert_eq!(camera.get_position(), position);
    }

    #[test]
    fn test_exit_while_following_is_noop() {
        let mut camera = CameraController::default();
        assert!(!camera.exit_ghost());
        assert_eq!(camera.get_mode(), CameraMode::Follow);
    }

    #[test]
    fn test_view_toggle_rejected_in_ghost() {
        let mut camera = CameraController::default();
        camera.enter_ghost();
        assert!(!camera.set_view(ViewMode::FirstPerson));
        assert_eq!(camera.get_view(), ViewMode::ThirdPerson);

        camera.exit_ghost();
        assert!(camera.set_view(ViewMode::FirstPerson));
        assert_eq!(camera.get_view(), ViewMode::FirstPerson);
    }

    #[test]
    fn test_follow_ignored_in_ghost() {
        let mut camera = CameraController::default();
        camera.enter_ghost();
        let position = camera.get_position();
        camera.follow(&player_at(9.5, 9.5, 0.0));
        assert_eq!(camera.get_position(), position);
    }

    #[test]
    fn test_ghost_direction_matches_forward() {
        let mut camera = CameraController::default();
        camera.enter_ghost();
        camera.rotate(3.0, 4.0);
        assert_eq!(camera.get_direction(), camera.get_forward());
        assert!(camera.get_direction().y > 0.0);
    }

    #[test]
    fn test_pitch_clamping() {
        let mut camera = CameraController::default();
        camera.enter_ghost();
        let max = camera.get_pitch_limits().1;

        for _ in 0..200 {
            camera.rotate(0.0, 10.0);
            assert!(camera.get_pitch() <= max);
        }
        assert_eq!(camera.get_pitch(), max);
    }

    #[test]
    fn test_rotate_ignored_in_follow() {
        let mut camera = CameraController::default();
        camera.rotate(5.0, 5.0);
        assert_eq!(camera.get_yaw(), DEFAULT_YAW);
        assert_eq!(camera.get_pitch(), 0.0);
    }

    #[test]
    fn test_fly_normalizes_combined_input() {
        let mut camera = CameraController::default();
        camera.enter_ghost();
        let keys = MovementKeys {
            forward: true,
            right: true,
            up: true,
            ..Default::default()
        };
        let step = camera.fly(&keys);
        assert!((step.length() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_fly_ignored_in_follow() {
        let mut camera = CameraController::default();
        let keys = MovementKeys {
            forward: true,
            ..Default::default()
        };
        assert_eq!(camera.fly(&keys), Vec3::ZERO);
    }

    #[test]
    fn test_reset_direction() {
        let player = player_at(3.5, 7.5, 1.0);
        let mut camera = CameraController::following(&player, CameraSettings::default());
        camera.reset_direction();
        assert_eq!(camera.get_direction(), DEFAULT_DIRECTION);
        assert_eq!(camera.get_yaw(), DEFAULT_YAW);
        assert_eq!(camera.get_pitch(), 0.0);
    }

    #[test]
    fn test_view_matrix_maps_eye_to_origin() {
        let player = player_at(4.5, 2.5, 0.0);
        let camera = CameraController::following(&player, CameraSettings::default());
        let eye = camera.view_matrix().transform_point3(camera.get_position());
        assert!(eye.length() < 1e-4);
    }
}
