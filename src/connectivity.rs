//! Land connectivity analysis
//!
//! Partitions land into 4-connected components with a queue-based flood fill
//! and keeps only the largest one, so every land tile on the final map is
//! reachable from every other. An all-water map is replaced by a circular
//! island centered on the grid.

use std::collections::VecDeque;

use crate::grid::{Cell, Grid, TileType};
use crate::tilemap::Tilemap;

/// A maximal set of 4-connected land cells
#[derive(Clone, Debug)]
pub struct LandComponent {
    /// Discovery order of the component (0 = first found in scan order)
    pub index: usize,
    pub cells: Vec<Cell>,
    /// Bounding box (min_x, min_y, max_x, max_y)
    pub bounds: (usize, usize, usize, usize),
}

impl LandComponent {
    fn new(index: usize) -> Self {
        Self {
            index,
            cells: Vec::new(),
            bounds: (usize::MAX, usize::MAX, 0, 0),
        }
    }

    fn add_cell(&mut self, x: usize, y: usize) {
        self.cells.push(Cell::new(x, y));
        self.bounds.0 = self.bounds.0.min(x);
        self.bounds.1 = self.bounds.1.min(y);
        self.bounds.2 = self.bounds.2.max(x);
        self.bounds.3 = self.bounds.3.max(y);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Outcome of the connectivity pass
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectivityReport {
    /// Land components found before filtering
    pub component_count: usize,
    /// Cells in the kept component (or in the fallback island)
    pub kept_cells: usize,
    /// Land cells converted back to water
    pub removed_cells: usize,
    /// True when no land existed and the circular fallback was synthesized
    pub used_fallback: bool,
}

/// Find all land components.
///
/// Scan order is x ascending in the outer loop and y ascending in the inner
/// loop; components are returned in discovery order.
pub fn find_land_components(grid: &Grid) -> Vec<LandComponent> {
    let width = grid.width;
    let height = grid.height;

    let mut visited = Tilemap::new_with(width, height, false);
    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for x in 0..width {
        for y in 0..height {
            if !grid.get(x, y).is_land() || *visited.get(x, y) {
                continue;
            }

            let mut component = LandComponent::new(components.len());
            queue.push_back((x, y));
            visited.set(x, y, true);

            while let Some((cx, cy)) = queue.pop_front() {
                component.add_cell(cx, cy);

                for (nx, ny) in grid.neighbors(cx, cy) {
                    if grid.get(nx, ny).is_land() && !*visited.get(nx, ny) {
                        visited.set(nx, ny, true);
                        queue.push_back((nx, ny));
                    }
                }
            }

            components.push(component);
        }
    }

    components
}

/// Index of the largest component. Ties go to the first discovered.
pub fn largest_component(components: &[LandComponent]) -> Option<&LandComponent> {
    let mut best: Option<&LandComponent> = None;
    for component in components {
        match best {
            Some(b) if b.len() >= component.len() => {}
            _ => best = Some(component),
        }
    }
    best
}

/// Radius of the fallback island for a grid.
pub fn fallback_radius(width: usize, height: usize) -> f32 {
    width.min(height) as f32 / 4.0
}

/// Overwrite the grid with a single disk of land at its center.
///
/// A cell is land when its distance to the center is strictly less than
/// `min(width, height) / 4`. Returns the number of land cells written.
pub fn fill_fallback_island(grid: &mut Grid) -> usize {
    let center_x = grid.width as f32 / 2.0;
    let center_y = grid.height as f32 / 2.0;
    let radius = fallback_radius(grid.width, grid.height);

    let mut land = 0;
    for (x, y, tile) in grid.iter_mut() {
        let dx = x as f32 - center_x;
        let dy = y as f32 - center_y;
        if (dx * dx + dy * dy).sqrt() < radius {
            *tile = TileType::Land;
            land += 1;
        } else {
            *tile = TileType::Water;
        }
    }

    // Tiny grids can round the disk away entirely
    if land == 0 && grid.width > 0 && grid.height > 0 {
        grid.set(grid.width / 2, grid.height / 2, TileType::Land);
        land = 1;
    }

    land
}

/// Keep only the largest land component, converting the rest to water.
///
/// Falls back to a circular island if the grid contains no land at all.
pub fn keep_largest_component(grid: &mut Grid) -> ConnectivityReport {
    let components = find_land_components(grid);
    let total_land: usize = components.iter().map(|c| c.len()).sum();

    let Some(largest) = largest_component(&components) else {
        let kept = fill_fallback_island(grid);
        log::warn!(
            "No land generated, using fallback island of radius {:.1} ({} tiles)",
            fallback_radius(grid.width, grid.height),
            kept
        );
        return ConnectivityReport {
            component_count: 0,
            kept_cells: kept,
            removed_cells: 0,
            used_fallback: true,
        };
    };

    grid.fill(TileType::Water);
    for cell in &largest.cells {
        grid.set(cell.x, cell.y, TileType::Land);
    }

    let report = ConnectivityReport {
        component_count: components.len(),
        kept_cells: largest.len(),
        removed_cells: total_land - largest.len(),
        used_fallback: false,
    };

    log::info!(
        "Kept largest of {} land components ({} tiles, {} removed)",
        report.component_count,
        report.kept_cells,
        report.removed_cells
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::count_land;

    fn grid_from_rows(rows: &[&str]) -> Grid {
        let height = rows.len();
        let width = rows[0].len();
        let mut grid = Grid::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if c == '#' {
                    grid.set(x, y, TileType::Land);
                }
            }
        }
        grid
    }

    #[test]
    fn test_components_use_four_connectivity() {
        // Diagonal touches do not connect
        let grid = grid_from_rows(&[
            "#.....",
            ".#....",
            "......",
            "...##.",
            "...##.",
        ]);
        let components = find_land_components(&grid);
        assert_eq!(components.len(), 3);
        let sizes: Vec<usize> = components.iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![1, 1, 4]);
        assert_eq!(components[2].bounds, (3, 3, 4, 4));
    }

    #[test]
    fn test_keep_largest_removes_others() {
        let mut grid = grid_from_rows(&[
            "##....#",
            "##....#",
            "......#",
            ".###..#",
            ".###...",
        ]);
        let report = keep_largest_component(&mut grid);
        assert_eq!(report.component_count, 3);
        assert_eq!(report.kept_cells, 6);
        assert_eq!(report.removed_cells, 8);
        assert!(!report.used_fallback);
        assert_eq!(count_land(&grid), 6);
        assert!(grid.get(2, 3).is_land());
        assert!(!grid.get(0, 0).is_land());
        assert!(!grid.get(6, 0).is_land());
        assert_eq!(find_land_components(&grid).len(), 1);
    }

    #[test]
    fn test_tie_goes_to_first_in_scan_order() {
        // Equal-sized components: the one with the smaller x is found first
        let mut grid = grid_from_rows(&[
            "....##",
            "......",
            "##....",
        ]);
        keep_largest_component(&mut grid);
        assert!(grid.get(0, 2).is_land());
        assert!(grid.get(1, 2).is_land());
        assert!(!grid.get(4, 0).is_land());
    }

    #[test]
    fn test_fallback_island_when_all_water() {
        let mut grid = Grid::new(40, 20);
        let report = keep_largest_component(&mut grid);
        assert!(report.used_fallback);
        assert!(report.kept_cells > 0);
        assert_eq!(count_land(&grid), report.kept_cells);

        // Radius is min(w, h) / 4 = 5 around (20, 10)
        assert!(grid.get(20, 10).is_land());
        assert!(grid.get(24, 10).is_land());
        assert!(!grid.get(25, 10).is_land());
        assert!(!grid.get(20, 15).is_land());
        for (x, y, tile) in grid.iter() {
            let d = ((x as f32 - 20.0).powi(2) + (y as f32 - 10.0).powi(2)).sqrt();
            assert_eq!(tile.is_land(), d < 5.0);
        }
        assert_eq!(find_land_components(&grid).len(), 1);
    }

    #[test]
    fn test_fallback_on_tiny_grid() {
        let mut grid = Grid::new(2, 2);
        let report = keep_largest_component(&mut grid);
        assert!(report.used_fallback);
        assert_eq!(count_land(&grid), 1);
    }

    #[test]
    fn test_large_single_component_does_not_overflow() {
        let mut grid = Grid::new_with(512, 512, TileType::Land);
        let report = keep_largest_component(&mut grid);
        assert_eq!(report.component_count, 1);
        assert_eq!(report.kept_cells, 512 * 512);
    }
}
