//! ASCII rendering and export for generated maps

use std::fs::File;
use std::io::{self, Write};

use chrono::Local;

use crate::generator::GeneratedMap;
use crate::grid::{count_land, Grid, TileType};
use crate::tilemap::Tilemap;
use crate::zones::PlacedZone;

const ZONE_OUTLINE: char = '+';
const ZONE_CENTER: char = '@';

pub fn tile_char(tile: TileType) -> char {
    match tile {
        TileType::Land => '#',
        TileType::Water => '~',
    }
}

/// Character overlay with zone outlines and centers drawn over the tiles.
fn zone_overlay(grid: &Grid, zones: &[PlacedZone]) -> Tilemap<Option<char>> {
    let mut overlay = Tilemap::new_with(grid.width, grid.height, None);
    for zone in zones {
        let (x0, y0, x1, y1) = zone.bounds(grid.width, grid.height);
        for x in x0..=x1 {
            overlay.set(x, y0, Some(ZONE_OUTLINE));
            overlay.set(x, y1, Some(ZONE_OUTLINE));
        }
        for y in y0..=y1 {
            overlay.set(x0, y, Some(ZONE_OUTLINE));
            overlay.set(x1, y, Some(ZONE_OUTLINE));
        }
        overlay.set(zone.center.x, zone.center.y, Some(ZONE_CENTER));
    }
    overlay
}

/// Render the grid one character per tile, top row first.
pub fn render_ascii_map(grid: &Grid, zones: &[PlacedZone]) -> String {
    let overlay = zone_overlay(grid, zones);
    let mut result = String::with_capacity((grid.width + 1) * grid.height);

    for y in 0..grid.height {
        for x in 0..grid.width {
            let ch = overlay.get(x, y).unwrap_or_else(|| tile_char(*grid.get(x, y)));
            result.push(ch);
        }
        result.push('\n');
    }

    result
}

pub fn legend() -> String {
    format!(
        "LEGEND:\n  {} = Land   {} = Water   {} = Mission zone outline   {} = Zone center\n",
        tile_char(TileType::Land),
        tile_char(TileType::Water),
        ZONE_OUTLINE,
        ZONE_CENTER
    )
}

/// Write a text file with a header, the map, a legend and zone listing.
pub fn export_map_file(map: &GeneratedMap, path: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    let total = map.width() * map.height();
    let land = count_land(&map.grid);

    writeln!(file, "=== ISLAND MAP ===")?;
    writeln!(file, "Seed: {}", map.seed)?;
    writeln!(file, "Size: {}x{} (tile size {})", map.width(), map.height(), map.tile_size)?;
    writeln!(file, "Land: {} tiles ({:.1}%)", land, 100.0 * land as f64 / total.max(1) as f64)?;
    if map.connectivity.used_fallback {
        writeln!(file, "Landmass: fallback island")?;
    }
    writeln!(file, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file)?;

    write!(file, "{}", render_ascii_map(&map.grid, &map.zones))?;
    writeln!(file)?;
    write!(file, "{}", legend())?;
    writeln!(file)?;

    writeln!(file, "=== MISSION ZONES ({}) ===", map.zones.len())?;
    for zone in &map.zones {
        writeln!(
            file,
            "  {:<16} center ({}, {}) size {}x{}",
            zone.id, zone.center.x, zone.center.y, zone.width, zone.height
        )?;
    }
    for skipped in &map.skipped_zones {
        writeln!(file, "  {:<16} NOT PLACED ({}x{})", skipped.id, skipped.width, skipped.height)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    #[test]
    fn test_render_tiles() {
        let mut grid = Grid::new(3, 2);
        grid.set(1, 0, TileType::Land);
        grid.set(2, 1, TileType::Land);
        assert_eq!(render_ascii_map(&grid, &[]), "~#~\n~~#\n");
    }

    #[test]
    fn test_render_zone_outline() {
        let grid = Grid::new_with(5, 5, TileType::Land);
        let zone = PlacedZone {
            id: "z".to_string(),
            center: Cell::new(2, 2),
            width: 3,
            height: 3,
        };
        let rendered = render_ascii_map(&grid, &[zone]);
        assert_eq!(rendered, "#####\n#+++#\n#+@+#\n#+++#\n#####\n");
    }
}
