//! Maze Grid Module
//!
//! Owns the fixed 2D tile grid the whole game is built on and answers
//! tile-semantics queries (wall, window, start, goal).
//!
//! ## Authoring Format
//! One row per line, every row the same length, one digit per tile:
//!
//! | code | tile          |
//! |------|---------------|
//! | `0`  | empty floor   |
//! | `1`  | wall          |
//! | `2`  | player start  |
//! | `3`  | goal          |
//! | `7`  | agent spawn   |
//! | `9`  | window (bars) |
//!
//! ## World Mapping
//! Rows run along world X, columns along world Z. Tile `(row, col)` covers
//! `X ∈ [row, row + 1)` and `Z ∈ [col, col + 1)` in cell units.

use std::path::Path;

use glam::Vec3;
use thiserror::Error;

/// The maze the game ships with (13 rows x 21 columns).
pub const DEFAULT_LAYOUT: &str = "\
113311111199111119911
110010011100111110009
110010009000100010709
110010011111111010011
110007000000000000009
110000000000000000009
111100191111991001111
110000000000000000009
100000000070000000009
900101001000111010011
900191001107000000001
111101001100000000211
111191111199111119911
";

/// Semantic code of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty,
    Wall,
    PlayerStart,
    Goal,
    AgentSpawn,
    Window,
}

impl Tile {
    /// Authoring digit for this tile.
    pub fn code(self) -> char {
        match self {
            Tile::Empty => '0',
            Tile::Wall => '1',
            Tile::PlayerStart => '2',
            Tile::Goal => '3',
            Tile::AgentSpawn => '7',
            Tile::Window => '9',
        }
    }

    /// Parse an authoring digit. Unknown codes yield `None`.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            '0' => Some(Tile::Empty),
            '1' => Some(Tile::Wall),
            '2' => Some(Tile::PlayerStart),
            '3' => Some(Tile::Goal),
            '7' => Some(Tile::AgentSpawn),
            '9' => Some(Tile::Window),
            _ => None,
        }
    }

    /// Walls and windows both block movement.
    #[inline]
    pub fn is_obstacle(self) -> bool {
        matches!(self, Tile::Wall | Tile::Window)
    }
}

/// Grid coordinates. Signed so that out-of-bounds probes are representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct GridPos {
    pub row: i32,
    pub col: i32,
}

impl GridPos {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Offset by `(d_row, d_col)`.
    #[inline]
    pub fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }
}

/// Cardinal neighbour probe used by window orientation.
///
/// West/East step along rows (world X), North/South along columns (world Z).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeDirection {
    West,
    North,
    East,
    South,
}

impl ProbeDirection {
    /// Fixed probe order. Even indices lie on the row axis, odd on the column axis.
    pub const ORDER: [ProbeDirection; 4] = [
        ProbeDirection::West,
        ProbeDirection::North,
        ProbeDirection::East,
        ProbeDirection::South,
    ];

    /// `(d_row, d_col)` step for this direction.
    pub fn step(self) -> (i32, i32) {
        match self {
            ProbeDirection::West => (-1, 0),
            ProbeDirection::North => (0, -1),
            ProbeDirection::East => (1, 0),
            ProbeDirection::South => (0, 1),
        }
    }
}

/// Authoring errors detected while loading a maze.
#[derive(Debug, Error)]
pub enum MazeError {
    #[error("maze has no rows")]
    Empty,
    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile code {code:?} at row {row}, column {col}")]
    UnknownCode { row: usize, col: usize, code: char },
    #[error("maze has no {0:?} tile")]
    MissingTile(Tile),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fixed, rectangular, immutable tile grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    width: usize,
    height: usize,
    /// Row-major tiles
    tiles: Vec<Tile>,
}

impl MazeGrid {
    /// Parse the authoring format.
    ///
    /// Blank lines and trailing whitespace are ignored. Rows must all have the
    /// same length and contain only known codes.
    pub fn parse(text: &str) -> Result<Self, MazeError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();
        Self::from_rows(&rows)
    }

    /// Build a grid from pre-split rows.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, MazeError> {
        let first = rows.first().ok_or(MazeError::Empty)?;
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(MazeError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(MazeError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, code) in line.chars().enumerate() {
                let tile = Tile::from_code(code).ok_or(MazeError::UnknownCode { row, col, code })?;
                tiles.push(tile);
            }
        }

        let grid = Self {
            width,
            height: rows.len(),
            tiles,
        };
        grid.warn_on_duplicates(Tile::PlayerStart);
        grid.warn_on_duplicates(Tile::Goal);
        Ok(grid)
    }

    /// Read and parse a maze file.
    pub fn load(path: &Path) -> Result<Self, MazeError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// The maze shipped with the game.
    pub fn builtin() -> Result<Self, MazeError> {
        Self::parse(DEFAULT_LAYOUT)
    }

    fn warn_on_duplicates(&self, tile: Tile) {
        let count = self.tiles.iter().filter(|&&t| t == tile).count();
        if count > 1 {
            tracing::warn!("maze has {} {:?} tiles, using the first", count, tile);
        }
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `pos` lies within `[0, height) x [0, width)`.
    #[inline]
    pub fn is_inside(&self, pos: GridPos) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.height
            && (pos.col as usize) < self.width
    }

    /// Tile at `pos`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, pos: GridPos) -> Option<Tile> {
        if !self.is_inside(pos) {
            return None;
        }
        Some(self.tiles[pos.row as usize * self.width + pos.col as usize])
    }

    /// Wall tile check. Out of bounds is not a wall.
    #[inline]
    pub fn is_wall(&self, pos: GridPos) -> bool {
        self.get(pos) == Some(Tile::Wall)
    }

    /// Window tile check. Out of bounds is not a window.
    #[inline]
    pub fn is_window(&self, pos: GridPos) -> bool {
        self.get(pos) == Some(Tile::Window)
    }

    /// Movement predicate: walls, windows and everything outside the grid block.
    #[inline]
    pub fn blocks(&self, pos: GridPos) -> bool {
        self.get(pos).is_none_or(Tile::is_obstacle)
    }

    /// First tile with the given code in row-major order.
    pub fn find_tile(&self, tile: Tile) -> Option<GridPos> {
        self.tiles
            .iter()
            .position(|&t| t == tile)
            .map(|index| GridPos::new((index / self.width) as i32, (index % self.width) as i32))
    }

    /// Authored player start.
    pub fn player_start(&self) -> Option<GridPos> {
        self.find_tile(Tile::PlayerStart)
    }

    /// Authored goal.
    pub fn goal(&self) -> Option<GridPos> {
        self.find_tile(Tile::Goal)
    }

    /// Middle of the grid, used for scene light placement.
    pub fn center(&self) -> GridPos {
        GridPos::new((self.height / 2) as i32, (self.width / 2) as i32)
    }

    /// Neighbouring cell in the given probe direction (may be outside).
    #[inline]
    pub fn neighbor(&self, pos: GridPos, direction: ProbeDirection) -> GridPos {
        let (d_row, d_col) = direction.step();
        pos.offset(d_row, d_col)
    }

    /// Iterate all tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, Tile)> + '_ {
        self.tiles.iter().enumerate().map(move |(index, &tile)| {
            (
                GridPos::new((index / self.width) as i32, (index % self.width) as i32),
                tile,
            )
        })
    }
}

/// Cell-size aware conversion between grid and world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridMetrics {
    pub cell_size: f32,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self { cell_size: 1.0 }
    }
}

impl GridMetrics {
    pub fn new(cell_size: f32) -> Self {
        Self { cell_size }
    }

    /// World position of the cell's minimum corner at floor height.
    pub fn cell_origin(&self, pos: GridPos) -> Vec3 {
        Vec3::new(
            pos.row as f32 * self.cell_size,
            0.0,
            pos.col as f32 * self.cell_size,
        )
    }

    /// World position of the cell's centre at floor height.
    pub fn cell_center(&self, pos: GridPos) -> Vec3 {
        self.cell_origin(pos) + Vec3::new(0.5, 0.0, 0.5) * self.cell_size
    }

    /// Tile containing a world point (floors X and Z, ignores Y).
    pub fn tile_at(&self, world: Vec3) -> GridPos {
        GridPos::new(
            (world.x / self.cell_size).floor() as i32,
            (world.z / self.cell_size).floor() as i32,
        )
    }
}
