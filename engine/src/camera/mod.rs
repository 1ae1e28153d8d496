//! Camera Module
//!
//! Follow/Ghost camera state machine for the maze.
//! This module is window-system agnostic - it only deals with camera state and math.

pub mod controller;

pub use controller::{
    CameraController, CameraMode, CameraSettings, CameraSnapshot, ViewMode, DEFAULT_DIRECTION,
    DEFAULT_YAW,
};
