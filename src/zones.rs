//! Mission zone placement
//!
//! Each requested footprint is placed by rejection sampling: random centers
//! are drawn until one keeps its distance from earlier zones and sits on
//! enough land, then the footprint is carved into the grid as solid land.
//! Footprints that exhaust their attempt budget are skipped.

use rand::Rng;

use crate::config::ZonePlacementParams;
use crate::grid::{Cell, Grid, TileType, WorldPosition};

fn default_zone_size() -> usize {
    15
}

/// Requested zone size in cells, tied back to the caller by `id`
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ZoneFootprint {
    /// Opaque caller identifier (mission name, prefab id, ...)
    pub id: String,
    #[serde(default = "default_zone_size")]
    pub width: usize,
    #[serde(default = "default_zone_size")]
    pub height: usize,
}

impl ZoneFootprint {
    pub fn new(id: impl Into<String>, width: usize, height: usize) -> Self {
        Self {
            id: id.into(),
            width,
            height,
        }
    }

    pub fn half_width(&self) -> usize {
        self.width / 2
    }

    pub fn half_height(&self) -> usize {
        self.height / 2
    }
}

/// A footprint bound to an accepted center
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlacedZone {
    pub id: String,
    pub center: Cell,
    pub width: usize,
    pub height: usize,
}

impl PlacedZone {
    pub fn footprint(&self) -> ZoneFootprint {
        ZoneFootprint::new(self.id.clone(), self.width, self.height)
    }

    pub fn world_center(&self, tile_size: f32) -> WorldPosition {
        WorldPosition::from_cell(self.center, tile_size)
    }

    /// Carved cell rectangle clipped to the grid: (min_x, min_y, max_x, max_y), inclusive.
    pub fn bounds(&self, grid_width: usize, grid_height: usize) -> (usize, usize, usize, usize) {
        let (x0, y0, x1, y1) = footprint_rect(self.center, self.width / 2, self.height / 2, 0);
        clip_rect(x0, y0, x1, y1, grid_width, grid_height)
            .unwrap_or((self.center.x, self.center.y, self.center.x, self.center.y))
    }
}

/// Outcome of a placement pass
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ZonePlacementReport {
    /// Accepted zones, in request order
    pub placed: Vec<PlacedZone>,
    /// Footprints that could not be placed
    pub skipped: Vec<ZoneFootprint>,
}

/// Signed inclusive rectangle around a center, grown by `margin`.
fn footprint_rect(
    center: Cell,
    half_width: usize,
    half_height: usize,
    margin: usize,
) -> (i64, i64, i64, i64) {
    let cx = center.x as i64;
    let cy = center.y as i64;
    let hw = (half_width + margin) as i64;
    let hh = (half_height + margin) as i64;
    (cx - hw, cy - hh, cx + hw, cy + hh)
}

fn clip_rect(
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    width: usize,
    height: usize,
) -> Option<(usize, usize, usize, usize)> {
    let x0 = x0.max(0);
    let y0 = y0.max(0);
    let x1 = x1.min(width as i64 - 1);
    let y1 = y1.min(height as i64 - 1);
    if x0 > x1 || y0 > y1 {
        return None;
    }
    Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
}

/// Fraction of land among the in-bounds cells of the footprint plus `buffer`.
pub fn land_ratio(grid: &Grid, center: Cell, footprint: &ZoneFootprint, buffer: usize) -> f32 {
    let (x0, y0, x1, y1) =
        footprint_rect(center, footprint.half_width(), footprint.half_height(), buffer);
    let Some((x0, y0, x1, y1)) = clip_rect(x0, y0, x1, y1, grid.width, grid.height) else {
        return 0.0;
    };

    let mut land = 0usize;
    let mut total = 0usize;
    for y in y0..=y1 {
        for x in x0..=x1 {
            total += 1;
            if grid.get(x, y).is_land() {
                land += 1;
            }
        }
    }

    if total == 0 {
        0.0
    } else {
        land as f32 / total as f32
    }
}

/// Whether the carved footprint would join existing land through a shared edge.
///
/// Checks the footprint itself and the strips directly beside each side.
/// Corner cells are excluded; a diagonal touch would leave the zone as a
/// separate component.
fn touches_land(grid: &Grid, center: Cell, footprint: &ZoneFootprint) -> bool {
    let (x0, y0, x1, y1) = footprint_rect(center, footprint.half_width(), footprint.half_height(), 0);
    let is_land = |x: i64, y: i64| grid.get_checked(x, y).is_some_and(|t| t.is_land());

    for y in y0..=y1 {
        for x in (x0 - 1)..=(x1 + 1) {
            if is_land(x, y) {
                return true;
            }
        }
    }
    for x in x0..=x1 {
        if is_land(x, y0 - 1) || is_land(x, y1 + 1) {
            return true;
        }
    }
    false
}

/// Force every in-bounds cell of the footprint to land.
pub fn carve_zone(grid: &mut Grid, center: Cell, footprint: &ZoneFootprint) {
    let (x0, y0, x1, y1) = footprint_rect(center, footprint.half_width(), footprint.half_height(), 0);
    let Some((x0, y0, x1, y1)) = clip_rect(x0, y0, x1, y1, grid.width, grid.height) else {
        return;
    };
    for y in y0..=y1 {
        for x in x0..=x1 {
            grid.set(x, y, TileType::Land);
        }
    }
}

/// Rejection-sample a center for one footprint.
///
/// Candidates satisfy `half <= c < dimension - half` on each axis.
pub fn find_zone_position<R: Rng + ?Sized>(
    grid: &Grid,
    footprint: &ZoneFootprint,
    placed: &[PlacedZone],
    params: &ZonePlacementParams,
    rng: &mut R,
) -> Option<Cell> {
    let half_w = footprint.half_width();
    let half_h = footprint.half_height();
    if grid.width <= half_w * 2 || grid.height <= half_h * 2 {
        return None;
    }

    for _ in 0..params.max_attempts {
        let x = rng.gen_range(half_w..grid.width - half_w);
        let y = rng.gen_range(half_h..grid.height - half_h);
        let candidate = Cell::new(x, y);

        if land_ratio(grid, candidate, footprint, params.buffer) < params.min_land_ratio {
            continue;
        }

        let too_close = placed
            .iter()
            .any(|zone| candidate.distance(&zone.center) < params.spacing);
        if too_close {
            continue;
        }

        if !touches_land(grid, candidate, footprint) {
            continue;
        }

        return Some(candidate);
    }

    None
}

/// Place all footprints in order, carving accepted zones into the grid.
pub fn place_zones<R: Rng + ?Sized>(
    grid: &mut Grid,
    footprints: &[ZoneFootprint],
    params: &ZonePlacementParams,
    rng: &mut R,
) -> ZonePlacementReport {
    let mut report = ZonePlacementReport::default();

    for footprint in footprints {
        match find_zone_position(grid, footprint, &report.placed, params, rng) {
            Some(center) => {
                carve_zone(grid, center, footprint);
                log::debug!(
                    "Mission zone '{}' placed at ({}, {}) with size {}x{}",
                    footprint.id,
                    center.x,
                    center.y,
                    footprint.width,
                    footprint.height
                );
                report.placed.push(PlacedZone {
                    id: footprint.id.clone(),
                    center,
                    width: footprint.width,
                    height: footprint.height,
                });
            }
            None => {
                log::warn!(
                    "Could not find valid position for mission zone '{}' of size {}x{}",
                    footprint.id,
                    footprint.width,
                    footprint.height
                );
                report.skipped.push(footprint.clone());
            }
        }
    }

    report
}
