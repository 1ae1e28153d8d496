//! Static Placement Module
//!
//! Walks the maze grid once at load time and produces world-space placement
//! records for walls, window bars and patrol-agent spawn points.
//!
//! Placement translations are anchored at the cell origin: wall and bar meshes
//! are authored to span the +X/+Z unit cell, so a quarter turn about Y followed
//! by a one-cell shift along Z keeps a rotated piece inside its own cell.

use std::f32::consts::FRAC_PI_2;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::grid::{GridMetrics, GridPos, MazeGrid, ProbeDirection, Tile};

/// Kind of static piece a placement instantiates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Wall,
    Window,
    AgentSpawn,
}

impl Archetype {
    /// Stable numeric id handed to the renderer.
    pub fn id(self) -> u32 {
        match self {
            Archetype::Wall => 0,
            Archetype::Window => 1,
            Archetype::AgentSpawn => 2,
        }
    }
}

/// How a window piece is turned relative to its authored orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowOrientation {
    /// Authored orientation, sealing a corridor along the row axis
    Default,
    /// Quarter turn about Y, shifted one cell along Z
    Rotated,
}

/// Layout parameters for static geometry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementSettings {
    /// World size of one tile
    pub cell_size: f32,
    /// Vertical extent of a wall block
    pub wall_height: f32,
    /// Tilt about X that stands the bars mesh upright (radians)
    pub window_mesh_tilt: f32,
    /// Asset-space offset applied to the bars mesh before tilting
    pub window_mesh_offset: Vec3,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            wall_height: 2.5,
            window_mesh_tilt: -FRAC_PI_2,
            window_mesh_offset: Vec3::new(-8.0, -7.1, 0.0),
        }
    }
}

impl PlacementSettings {
    pub fn metrics(&self) -> GridMetrics {
        GridMetrics::new(self.cell_size)
    }

    /// Asset alignment for the bars mesh.
    fn window_mesh_fixup(&self) -> Mat4 {
        Mat4::from_rotation_x(self.window_mesh_tilt)
            * Mat4::from_translation(self.window_mesh_offset)
    }
}

/// One precomputed static piece.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub archetype: Archetype,
    pub transform: Mat4,
    pub source: GridPos,
}

impl PlacementRecord {
    /// World translation of this placement.
    pub fn translation(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }

    /// GPU instance record for the rendering consumer.
    pub fn instance(&self) -> PlacementInstance {
        PlacementInstance {
            model: self.transform.to_cols_array_2d(),
            archetype: self.archetype.id(),
            row: self.source.row,
            col: self.source.col,
            _pad0: 0,
        }
    }
}

/// GPU-compatible placement instance.
///
/// Layout (80 bytes):
/// - model:     mat4x4<f32> (64 bytes) - column-major world transform
/// - archetype: u32 (4 bytes)
/// - row, col:  i32 (8 bytes) - source tile
/// - _pad0:     u32 (4 bytes)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct PlacementInstance {
    pub model: [[f32; 4]; 4],
    pub archetype: u32,
    pub row: i32,
    pub col: i32,
    pub _pad0: u32,
}

static_assertions::assert_eq_size!(PlacementInstance, [u8; 80]);

/// Converts a grid into placement records.
#[derive(Clone, Debug, Default)]
pub struct PlacementBuilder {
    settings: PlacementSettings,
}

impl PlacementBuilder {
    pub fn new(settings: PlacementSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PlacementSettings {
        &self.settings
    }

    /// Single row-major pass over the grid.
    pub fn build(&self, grid: &MazeGrid) -> Vec<PlacementRecord> {
        let placements: Vec<PlacementRecord> = grid
            .iter()
            .filter_map(|(pos, tile)| match tile {
                Tile::Wall => Some(self.wall(pos)),
                Tile::Window => Some(self.window(grid, pos)),
                Tile::AgentSpawn => Some(self.agent_spawn(pos)),
                _ => None,
            })
            .collect();

        tracing::debug!(
            "built {} placements from {}x{} grid",
            placements.len(),
            grid.height(),
            grid.width()
        );
        placements
    }

    fn wall(&self, pos: GridPos) -> PlacementRecord {
        let origin = self.settings.metrics().cell_origin(pos);
        let lift = Vec3::new(0.0, self.settings.wall_height * 0.5, 0.0);
        PlacementRecord {
            archetype: Archetype::Wall,
            transform: Mat4::from_translation(origin + lift),
            source: pos,
        }
    }

    fn window(&self, grid: &MazeGrid, pos: GridPos) -> PlacementRecord {
        let mut origin = self.settings.metrics().cell_origin(pos);
        let mut turn = Mat4::IDENTITY;
        if window_orientation(grid, pos) == WindowOrientation::Rotated {
            turn = Mat4::from_rotation_y(FRAC_PI_2);
            origin.z += self.settings.cell_size;
        }
        PlacementRecord {
            archetype: Archetype::Window,
            transform: Mat4::from_translation(origin) * turn * self.settings.window_mesh_fixup(),
            source: pos,
        }
    }

    fn agent_spawn(&self, pos: GridPos) -> PlacementRecord {
        PlacementRecord {
            archetype: Archetype::AgentSpawn,
            transform: Mat4::from_translation(self.settings.metrics().cell_center(pos)),
            source: pos,
        }
    }
}

/// Orientation of a window from its local wall topology.
///
/// Neighbours are probed west, north, east, south. The first wall found
/// decides: row-axis hit keeps the default, column-axis hit rotates. With no
/// wall neighbour the default is kept. A window with walls on both axes takes
/// whichever comes first in probe order.
pub fn window_orientation(grid: &MazeGrid, pos: GridPos) -> WindowOrientation {
    for (index, direction) in ProbeDirection::ORDER.iter().enumerate() {
        let neighbor = grid.neighbor(pos, *direction);
        if !grid.is_inside(neighbor) || !grid.is_wall(neighbor) {
            continue;
        }
        return if index % 2 == 0 {
            WindowOrientation::Default
        } else {
            WindowOrientation::Rotated
        };
    }
    WindowOrientation::Default
}

/// Filter placements by archetype.
pub fn of_archetype(
    placements: &[PlacementRecord],
    archetype: Archetype,
) -> impl Iterator<Item = &PlacementRecord> {
    placements.iter().filter(move |p| p.archetype == archetype)
}
