//! World Module
//!
//! Contains the maze tile grid and the static placements derived from it.
//!
//! ## Units
//! One tile is `cell_size` world units (1.0 by default). Y is up; rows run
//! along X and columns along Z.

pub mod grid;
pub mod placement;

pub use grid::{DEFAULT_LAYOUT, GridMetrics, GridPos, MazeError, MazeGrid, ProbeDirection, Tile};
pub use placement::{
    Archetype, PlacementBuilder, PlacementInstance, PlacementRecord, PlacementSettings,
    WindowOrientation, of_archetype, window_orientation,
};
