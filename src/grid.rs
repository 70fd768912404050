//! Land/water classification grid and world-space conversion
//!
//! The grid is always integer-indexed; `tile_size` only appears at the
//! boundary where cells become world positions (x, 0, y).

use crate::tilemap::Tilemap;

/// Two-level tile classification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash, serde::Serialize, serde::Deserialize)]
pub enum TileType {
    #[default]
    Water,
    Land,
}

impl TileType {
    pub fn is_land(&self) -> bool {
        matches!(self, TileType::Land)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TileType::Water => "Water",
            TileType::Land => "Land",
        }
    }
}

/// The map grid
pub type Grid = Tilemap<TileType>;

/// Integer cell coordinate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Planar distance between two cell centers.
    pub fn distance(&self, other: &Cell) -> f32 {
        let dx = self.x as f32 - other.x as f32;
        let dy = self.y as f32 - other.y as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Position in world units. The map lies on the x/z plane at y = 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WorldPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPosition {
    pub const ZERO: WorldPosition = WorldPosition { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// World position of a cell on the ground plane.
    pub fn from_cell(cell: Cell, tile_size: f32) -> Self {
        Self {
            x: cell.x as f32 * tile_size,
            y: 0.0,
            z: cell.y as f32 * tile_size,
        }
    }

    /// Nearest cell coordinate (may be outside the grid).
    pub fn to_cell_coords(&self, tile_size: f32) -> (i64, i64) {
        (
            (self.x / tile_size).round() as i64,
            (self.z / tile_size).round() as i64,
        )
    }
}

/// Count land cells in the grid.
pub fn count_land(grid: &Grid) -> usize {
    grid.iter().filter(|(_, _, t)| t.is_land()).count()
}

/// Collect land cell coordinates in row order.
pub fn land_cells(grid: &Grid) -> Vec<Cell> {
    grid.iter()
        .filter(|(_, _, t)| t.is_land())
        .map(|(x, y, _)| Cell::new(x, y))
        .collect()
}
