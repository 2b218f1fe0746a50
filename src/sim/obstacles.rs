//! Collision map and the obstacle set built from it
//!
//! The map is a rectangular grid of tile codes exported from the level editor.
//! Only wall cells become obstacles; the rest of the grid is walkable.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::state::Movable;

/// Malformed collision map
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// No rows, or rows with no cells
    Empty,
    /// A row's length differs from the first row's
    Ragged { row: usize, expected: usize, found: usize },
    /// Flat data with zero columns or a length not divisible by the column count
    BadFlatLength { len: usize, columns: usize },
    /// Input was not a JSON array of arrays of cell codes
    Parse(String),
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::Empty => write!(f, "collision map is empty"),
            MapError::Ragged { row, expected, found } => write!(
                f,
                "collision map row {} has {} cells, expected {}",
                row, found, expected
            ),
            MapError::BadFlatLength { len, columns } => write!(
                f,
                "{} cells can't be split into rows of {}",
                len, columns
            ),
            MapError::Parse(msg) => write!(f, "collision map parse error: {}", msg),
        }
    }
}

impl std::error::Error for MapError {}

/// A validated, rectangular grid of tile codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionMap {
    rows: Vec<Vec<u32>>,
    columns: usize,
}

impl CollisionMap {
    /// Build from nested rows, rejecting empty or ragged grids
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self, MapError> {
        let columns = rows.first().map(|r| r.len()).unwrap_or(0);
        if columns == 0 {
            return Err(MapError::Empty);
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != columns) {
            return Err(MapError::Ragged {
                row,
                expected: columns,
                found: r.len(),
            });
        }
        Ok(Self { rows, columns })
    }

    /// Build from a flat row-major export (what tile editors write out)
    pub fn from_flat(data: &[u32], columns: usize) -> Result<Self, MapError> {
        if columns == 0 || data.len() % columns != 0 {
            return Err(MapError::BadFlatLength {
                len: data.len(),
                columns,
            });
        }
        Self::from_rows(data.chunks(columns).map(|c| c.to_vec()).collect())
    }

    /// Parse a JSON array of rows
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        let rows: Vec<Vec<u32>> =
            serde_json::from_str(json).map_err(|e| MapError::Parse(e.to_string()))?;
        Self::from_rows(rows)
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<u32> {
        self.rows.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Number of cells carrying the given code
    pub fn count_of(&self, code: u32) -> usize {
        self.rows.iter().flatten().filter(|&&c| c == code).count()
    }
}

/// A wall cell placed in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub bounds: Aabb,
}

impl Movable for Obstacle {
    fn translate(&mut self, delta: Vec2) {
        self.bounds.pos += delta;
    }
}

/// Turn every `solid` cell into a `cell_size` square at `cell * cell_size + origin`
///
/// Output is in row-major scan order.
pub fn build_obstacles(map: &CollisionMap, solid: u32, cell_size: f32, origin: Vec2) -> Vec<Obstacle> {
    let mut obstacles = Vec::new();
    for (i, row) in map.rows.iter().enumerate() {
        for (j, &code) in row.iter().enumerate() {
            if code == solid {
                obstacles.push(Obstacle {
                    bounds: Aabb::new(
                        j as f32 * cell_size + origin.x,
                        i as f32 * cell_size + origin.y,
                        cell_size,
                        cell_size,
                    ),
                });
            }
        }
    }
    obstacles
}
