//! Read-only spawn queries over a finished map
//!
//! Used by player/vehicle spawning and mission point placement. Nothing here
//! mutates the grid, so a `SpawnQueries` can be shared freely between readers.

use rand::Rng;

use crate::error::{MapError, Result};
use crate::grid::{Cell, Grid, WorldPosition};

/// Query surface borrowing a finished grid and its land tile list
#[derive(Clone, Copy, Debug)]
pub struct SpawnQueries<'a> {
    grid: &'a Grid,
    land_tiles: &'a [Cell],
    tile_size: f32,
}

impl<'a> SpawnQueries<'a> {
    /// `land_tiles` must list exactly the land cells of `grid`.
    pub fn new(grid: &'a Grid, land_tiles: &'a [Cell], tile_size: f32) -> Self {
        Self {
            grid,
            land_tiles,
            tile_size,
        }
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn land_tiles(&self) -> &'a [Cell] {
        self.land_tiles
    }

    pub fn land_count(&self) -> usize {
        self.land_tiles.len()
    }

    /// Whether a cell is land. Out-of-bounds coordinates are never land.
    pub fn is_land(&self, x: i64, y: i64) -> bool {
        self.grid.get_checked(x, y).is_some_and(|t| t.is_land())
    }

    /// Whether the cell nearest a world position is land.
    pub fn is_land_at(&self, position: WorldPosition) -> bool {
        let (x, y) = position.to_cell_coords(self.tile_size);
        self.is_land(x, y)
    }

    pub fn cell_to_world(&self, cell: Cell) -> WorldPosition {
        WorldPosition::from_cell(cell, self.tile_size)
    }

    /// Uniformly random land tile in world space.
    pub fn random_land_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<WorldPosition> {
        if self.land_tiles.is_empty() {
            log::error!("No land tiles available!");
            return Err(MapError::NoLandAvailable);
        }
        let cell = self.land_tiles[rng.gen_range(0..self.land_tiles.len())];
        Ok(self.cell_to_world(cell))
    }

    /// Nearest land tile to a world position, searched in expanding rings.
    ///
    /// Rings have Chebyshev radius 0, 1, 2, ... around the start cell (clamped
    /// into the grid) and are visited row by row, left to right. The search
    /// radius covers the whole grid. Returns the grid center only if the grid
    /// holds no land at all.
    pub fn find_spawn_near(&self, position: WorldPosition) -> WorldPosition {
        match self.find_land_cell_near(position) {
            Some(cell) => self.cell_to_world(cell),
            None => {
                log::warn!("No land near ({:.1}, {:.1}), using map center", position.x, position.z);
                self.cell_to_world(self.center_cell())
            }
        }
    }

    /// Cell form of `find_spawn_near`.
    pub fn find_land_cell_near(&self, position: WorldPosition) -> Option<Cell> {
        let width = self.grid.width as i64;
        let height = self.grid.height as i64;
        if width == 0 || height == 0 {
            return None;
        }

        let (sx, sy) = position.to_cell_coords(self.tile_size);
        let sx = sx.clamp(0, width - 1);
        let sy = sy.clamp(0, height - 1);
        let max_radius = width.max(height);

        for radius in 0..=max_radius {
            for dy in -radius..=radius {
                let y = sy + dy;
                if y < 0 || y >= height {
                    continue;
                }
                if dy.abs() == radius {
                    for dx in -radius..=radius {
                        if self.is_land(sx + dx, y) {
                            return Some(Cell::new((sx + dx) as usize, y as usize));
                        }
                    }
                } else {
                    // Only the left and right edges of the ring
                    if self.is_land(sx - radius, y) {
                        return Some(Cell::new((sx - radius) as usize, y as usize));
                    }
                    if radius > 0 && self.is_land(sx + radius, y) {
                        return Some(Cell::new((sx + radius) as usize, y as usize));
                    }
                }
            }
        }

        None
    }

    /// Spawn point for the player: the land tile nearest the map center.
    pub fn player_spawn_position(&self) -> WorldPosition {
        self.find_spawn_near(self.cell_to_world(self.center_cell()))
    }

    fn center_cell(&self) -> Cell {
        Cell::new(self.grid.width / 2, self.grid.height / 2)
    }
}
