//! Tile materialization plan
//!
//! Turns a finished map into placement instructions for whatever builds the
//! renderable/collidable world. The builder implements `TileSink`; this
//! module only decides what goes where.

use crate::generator::GeneratedMap;
use crate::grid::{Cell, Grid, TileType, WorldPosition};
use crate::zones::PlacedZone;

/// What to place on a tile
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileKind {
    /// Walkable ground
    Land,
    /// Invisible blocking wall over water
    WaterWall,
}

/// One tile placement
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilePlacement {
    pub cell: Cell,
    pub kind: TileKind,
    pub position: WorldPosition,
    /// Collider height (0 for land)
    pub wall_height: f32,
}

/// Receiver for materialization calls
pub trait TileSink {
    fn place_tile(&mut self, placement: &TilePlacement);

    /// Called once per mission zone after all tiles, in placement order.
    fn place_zone(&mut self, _zone: &PlacedZone, _position: WorldPosition) {}
}

/// Placement for every cell, row by row.
pub fn plan_tiles(
    grid: &Grid,
    tile_size: f32,
    water_wall_height: f32,
) -> impl Iterator<Item = TilePlacement> + '_ {
    grid.iter().map(move |(x, y, tile)| {
        let cell = Cell::new(x, y);
        let (kind, wall_height) = match tile {
            TileType::Land => (TileKind::Land, 0.0),
            TileType::Water => (TileKind::WaterWall, water_wall_height),
        };
        TilePlacement {
            cell,
            kind,
            position: WorldPosition::from_cell(cell, tile_size),
            wall_height,
        }
    })
}

/// Drive a sink over the whole map: every tile, then every zone.
/// Returns the number of tiles placed.
pub fn materialize<S: TileSink + ?Sized>(map: &GeneratedMap, sink: &mut S) -> usize {
    let mut placed = 0;
    for placement in plan_tiles(&map.grid, map.tile_size, map.water_wall_height) {
        sink.place_tile(&placement);
        placed += 1;
    }
    for zone in &map.zones {
        sink.place_zone(zone, zone.world_center(map.tile_size));
    }
    log::debug!("Materialized {} tiles and {} zones", placed, map.zones.len());
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;
    use crate::generator::generate_map;
    use crate::zones::ZoneFootprint;

    #[derive(Default)]
    struct CountingSink {
        land: usize,
        walls: usize,
        zones: Vec<(String, WorldPosition)>,
    }

    impl TileSink for CountingSink {
        fn place_tile(&mut self, placement: &TilePlacement) {
            match placement.kind {
                TileKind::Land => self.land += 1,
                TileKind::WaterWall => self.walls += 1,
            }
        }

        fn place_zone(&mut self, zone: &PlacedZone, position: WorldPosition) {
            self.zones.push((zone.id.clone(), position));
        }
    }

    #[test]
    fn test_plan_positions() {
        let mut grid = Grid::new(2, 2);
        grid.set(1, 1, TileType::Land);
        let plan: Vec<TilePlacement> = plan_tiles(&grid, 3.0, 5.0).collect();
        assert_eq!(plan.len(), 4);
        assert_eq!(plan[3].kind, TileKind::Land);
        assert_eq!(plan[3].position, WorldPosition::new(3.0, 0.0, 3.0));
        assert_eq!(plan[3].wall_height, 0.0);
        assert_eq!(plan[1].kind, TileKind::WaterWall);
        assert_eq!(plan[1].position, WorldPosition::new(3.0, 0.0, 0.0));
        assert_eq!(plan[1].wall_height, 5.0);
    }

    #[test]
    fn test_materialize_counts() {
        let mut config = MapConfig::default()
            .with_size(50, 50)
            .with_seed(99)
            .with_footprints(vec![ZoneFootprint::new("base", 7, 7)]);
        config.tile_size = 2.0;
        let map = generate_map(config).unwrap();

        let mut sink = CountingSink::default();
        let placed = materialize(&map, &mut sink);
        assert_eq!(placed, 2500);
        assert_eq!(sink.land, map.land_tiles().len());
        assert_eq!(sink.land + sink.walls, 2500);
        assert_eq!(sink.zones.len(), map.zones.len());
        for ((id, position), zone) in sink.zones.iter().zip(&map.zones) {
            assert_eq!(id, &zone.id);
            assert_eq!(position.x, zone.center.x as f32 * 2.0);
        }
    }
}
