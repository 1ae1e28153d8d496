//! Maze World
//!
//! Load-time assembly: grid, static placements and the spawn transforms the
//! session needs. Created once and read-only afterwards.

use std::path::Path;

use glam::Vec3;

use crate::player::SpawnPoint;
use crate::world::{
    Archetype, GridMetrics, GridPos, MazeError, MazeGrid, PlacementBuilder, PlacementRecord, Tile,
    of_archetype,
};

use super::config::GameConfig;

/// Everything static about a loaded maze.
#[derive(Clone, Debug)]
pub struct MazeWorld {
    grid: MazeGrid,
    metrics: GridMetrics,
    placements: Vec<PlacementRecord>,
    start: GridPos,
    goal: GridPos,
    spawn: SpawnPoint,
}

impl MazeWorld {
    /// Assemble a world. Fails if the grid has no start or no goal.
    pub fn build(grid: MazeGrid, config: &GameConfig) -> Result<Self, MazeError> {
        let start = grid
            .player_start()
            .ok_or(MazeError::MissingTile(Tile::PlayerStart))?;
        let goal = grid.goal().ok_or(MazeError::MissingTile(Tile::Goal))?;

        let metrics = config.placement.metrics();
        let placements = PlacementBuilder::new(config.placement).build(&grid);
        let spawn = SpawnPoint {
            position: metrics.cell_center(start),
            facing: config.player.spawn_facing,
        };

        tracing::info!(
            rows = grid.height(),
            cols = grid.width(),
            placements = placements.len(),
            start = ?start,
            goal = ?goal,
            "maze world built"
        );

        Ok(Self {
            grid,
            metrics,
            placements,
            start,
            goal,
            spawn,
        })
    }

    /// Parse authoring text and assemble.
    pub fn from_text(text: &str, config: &GameConfig) -> Result<Self, MazeError> {
        Self::build(MazeGrid::parse(text)?, config)
    }

    /// Read a maze file and assemble.
    pub fn load(path: &Path, config: &GameConfig) -> Result<Self, MazeError> {
        Self::build(MazeGrid::load(path)?, config)
    }

    /// The maze the game ships with.
    pub fn builtin(config: &GameConfig) -> Result<Self, MazeError> {
        Self::build(MazeGrid::builtin()?, config)
    }

    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    pub fn metrics(&self) -> GridMetrics {
        self.metrics
    }

    pub fn placements(&self) -> &[PlacementRecord] {
        &self.placements
    }

    pub fn start(&self) -> GridPos {
        self.start
    }

    pub fn goal(&self) -> GridPos {
        self.goal
    }

    /// Player spawn transform (start cell centre).
    pub fn spawn(&self) -> SpawnPoint {
        self.spawn
    }

    /// Agent spawn positions, in grid order.
    pub fn agent_spawns(&self) -> impl Iterator<Item = Vec3> + '_ {
        of_archetype(&self.placements, Archetype::AgentSpawn).map(PlacementRecord::translation)
    }

    /// Scene light position: above the grid centre.
    pub fn light_position(&self, height: f32) -> Vec3 {
        self.metrics.cell_origin(self.grid.center()) + Vec3::new(0.0, height, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_world() {
        let world = MazeWorld::builtin(&GameConfig::default()).unwrap();
        assert_eq!(world.start(), GridPos::new(11, 18));
        assert_eq!(world.goal(), GridPos::new(0, 2));
        assert_eq!(world.spawn().position, Vec3::new(11.5, 0.0, 18.5));
        assert!(world.agent_spawns().count() > 0);
    }

    #[test]
    fn test_missing_start_is_error() {
        let result = MazeWorld::from_text("0301", &GameConfig::default());
        assert!(matches!(result, Err(MazeError::MissingTile(Tile::PlayerStart))));
    }

    #[test]
    fn test_missing_goal_is_error() {
        let result = MazeWorld::from_text("0201", &GameConfig::default());
        assert!(matches!(result, Err(MazeError::MissingTile(Tile::Goal))));
    }

    #[test]
    fn test_spawn_uses_configured_facing() {
        let mut config = GameConfig::default();
        config.player.spawn_facing = 1.25;
        let world = MazeWorld::from_text("231", &config).unwrap();
        assert_eq!(world.spawn().facing, 1.25);
        assert_eq!(world.spawn().position, Vec3::new(0.5, 0.0, 0.5));
    }

    #[test]
    fn test_light_above_center() {
        let world = MazeWorld::from_text("2000\n0003", &GameConfig::default()).unwrap();
        assert_eq!(world.light_position(4.0), Vec3::new(1.0, 4.0, 2.0));
    }
}
