//! Minimap image and JSON export
//!
//! The minimap is a land/water colored image with mission zone outlines,
//! one pixel block per tile. The JSON export carries everything a consumer
//! outside this process needs to rebuild the map.

use image::{Rgb, RgbImage};
use serde::Serialize;

use crate::error::Result;
use crate::generator::GeneratedMap;
use crate::grid::{Grid, TileType};
use crate::zones::PlacedZone;

const LAND_COLOR: Rgb<u8> = Rgb([96, 148, 72]);
const WATER_COLOR: Rgb<u8> = Rgb([38, 84, 150]);
const ZONE_COLOR: Rgb<u8> = Rgb([240, 210, 60]);

pub fn tile_color(tile: TileType) -> Rgb<u8> {
    match tile {
        TileType::Land => LAND_COLOR,
        TileType::Water => WATER_COLOR,
    }
}

/// Render the minimap. `scale` is the pixel size of one tile (min 1).
///
/// Image rows follow grid rows (y = 0 at the top).
pub fn render_minimap(grid: &Grid, zones: &[PlacedZone], scale: u32) -> RgbImage {
    let scale = scale.max(1);
    let mut img = RgbImage::new(grid.width as u32 * scale, grid.height as u32 * scale);

    for (x, y, tile) in grid.iter() {
        fill_block(&mut img, x as u32, y as u32, scale, tile_color(*tile));
    }

    for zone in zones {
        let (x0, y0, x1, y1) = zone.bounds(grid.width, grid.height);
        for x in x0..=x1 {
            fill_block(&mut img, x as u32, y0 as u32, scale, ZONE_COLOR);
            fill_block(&mut img, x as u32, y1 as u32, scale, ZONE_COLOR);
        }
        for y in y0..=y1 {
            fill_block(&mut img, x0 as u32, y as u32, scale, ZONE_COLOR);
            fill_block(&mut img, x1 as u32, y as u32, scale, ZONE_COLOR);
        }
    }

    img
}

fn fill_block(img: &mut RgbImage, tile_x: u32, tile_y: u32, scale: u32, color: Rgb<u8>) {
    for dy in 0..scale {
        for dx in 0..scale {
            img.put_pixel(tile_x * scale + dx, tile_y * scale + dy, color);
        }
    }
}

/// Export the minimap as an image (format from the file extension).
pub fn export_minimap(map: &GeneratedMap, filename: &str, scale: u32) -> Result<()> {
    let img = render_minimap(&map.grid, &map.zones, scale);
    img.save(filename)?;
    log::debug!("Exported minimap to {}", filename);
    Ok(())
}

/// Serializable snapshot of a generated map
#[derive(Debug, Serialize)]
pub struct MapSnapshot<'a> {
    pub seed: u64,
    pub width: usize,
    pub height: usize,
    pub tile_size: f32,
    pub land_tiles: usize,
    /// One string per row, `#` for land and `~` for water
    pub rows: Vec<String>,
    pub zones: &'a [PlacedZone],
    pub skipped_zones: Vec<&'a str>,
}

impl<'a> MapSnapshot<'a> {
    pub fn new(map: &'a GeneratedMap) -> Self {
        let rows = map
            .grid
            .rows()
            .map(|row| row.iter().map(|t| crate::ascii::tile_char(*t)).collect())
            .collect();
        Self {
            seed: map.seed,
            width: map.width(),
            height: map.height(),
            tile_size: map.tile_size,
            land_tiles: map.land_tiles().len(),
            rows,
            zones: &map.zones,
            skipped_zones: map.skipped_zones.iter().map(|z| z.id.as_str()).collect(),
        }
    }
}

pub fn to_json(map: &GeneratedMap) -> Result<String> {
    Ok(serde_json::to_string_pretty(&MapSnapshot::new(map))?)
}

pub fn export_json(map: &GeneratedMap, filename: &str) -> Result<()> {
    std::fs::write(filename, to_json(map)?)?;
    log::debug!("Exported map data to {}", filename);
    Ok(())
}
