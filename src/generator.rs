//! Map generation pipeline
//!
//! Runs noise field → connectivity filter → zone placement from a single
//! seeded `ChaCha8Rng`, then hands out the finished map as an immutable value.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::MapConfig;
use crate::connectivity::{self, ConnectivityReport};
use crate::error::Result;
use crate::grid::{count_land, land_cells, Cell, Grid};
use crate::noise_field;
use crate::signal::MapPublisher;
use crate::spawn::SpawnQueries;
use crate::zones::{self, PlacedZone, ZoneFootprint};

/// Range for automatically chosen seeds (short enough to type back in)
const AUTO_SEED_RANGE: std::ops::Range<u64> = 1..10_000;

/// A finished, read-only map
#[derive(Clone, Debug)]
pub struct GeneratedMap {
    /// Seed the map was generated from (never 0)
    pub seed: u64,
    pub tile_size: f32,
    pub water_wall_height: f32,
    pub grid: Grid,
    /// Placed mission zones, in request order
    pub zones: Vec<PlacedZone>,
    /// Requested footprints that could not be placed
    pub skipped_zones: Vec<ZoneFootprint>,
    pub connectivity: ConnectivityReport,
    land_tiles: Vec<Cell>,
}

impl GeneratedMap {
    pub fn width(&self) -> usize {
        self.grid.width
    }

    pub fn height(&self) -> usize {
        self.grid.height
    }

    pub fn land_tiles(&self) -> &[Cell] {
        &self.land_tiles
    }

    /// Spawn/land queries over this map.
    pub fn spawn(&self) -> SpawnQueries<'_> {
        SpawnQueries::new(&self.grid, &self.land_tiles, self.tile_size)
    }
}

/// Owns a validated configuration and runs the pipeline on demand
#[derive(Clone, Debug)]
pub struct MapGenerator {
    config: MapConfig,
}

impl MapGenerator {
    /// Validate the configuration. Nothing is allocated for an invalid one.
    pub fn new(config: MapConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// The configured seed, or a freshly drawn one stored for later runs.
    pub fn resolve_seed(&mut self) -> u64 {
        if self.config.seed == 0 {
            self.config.seed = rand::thread_rng().gen_range(AUTO_SEED_RANGE);
            log::info!("No seed given, picked {}", self.config.seed);
        }
        self.config.seed
    }

    /// Run the full pipeline.
    pub fn generate(&mut self) -> GeneratedMap {
        let seed = self.resolve_seed();
        let config = &self.config;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut grid =
            noise_field::generate_noise_field(config.width, config.height, &config.noise, &mut rng);
        log::debug!("Noise field: {} land tiles before filtering", count_land(&grid));

        let connectivity = connectivity::keep_largest_component(&mut grid);

        let placement = if config.footprints.is_empty() {
            log::warn!("No mission zone footprints requested");
            zones::ZonePlacementReport::default()
        } else {
            zones::place_zones(&mut grid, &config.footprints, &config.zones, &mut rng)
        };

        let land_tiles = land_cells(&grid);

        log::info!("Map generated with seed: {}", seed);
        log::info!("Total land tiles: {}", land_tiles.len());
        log::info!(
            "Mission zones placed: {} of {}",
            placement.placed.len(),
            config.footprints.len()
        );

        GeneratedMap {
            seed,
            tile_size: config.tile_size,
            water_wall_height: config.water_wall_height,
            grid,
            zones: placement.placed,
            skipped_zones: placement.skipped,
            connectivity,
            land_tiles,
        }
    }

    /// Run the pipeline and publish the result to waiting readers.
    pub fn generate_and_publish(&mut self, publisher: &MapPublisher) -> bool {
        let map = self.generate();
        publisher.publish(map)
    }
}

/// Convenience wrapper: validate, generate once.
pub fn generate_map(config: MapConfig) -> Result<GeneratedMap> {
    Ok(MapGenerator::new(config)?.generate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NoiseParams;
    use crate::connectivity::{fallback_radius, find_land_components};
    use crate::error::MapError;
    use crate::grid::WorldPosition;
    use crate::zones::land_ratio;

    fn scenario_config(width: usize, height: usize, seed: u64) -> MapConfig {
        MapConfig {
            noise: NoiseParams {
                continent_scale: 20.0,
                continent_threshold: 0.4,
                hole_scale: 10.0,
                hole_weight: 0.3,
            },
            ..MapConfig::default()
        }
        .with_size(width, height)
        .with_seed(seed)
    }

    #[test]
    fn test_same_seed_is_bit_identical() {
        let a = generate_map(scenario_config(10, 10, 42)).unwrap();
        let b = generate_map(scenario_config(10, 10, 42)).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(count_land(&a.grid), count_land(&b.grid));
        assert_eq!(a.land_tiles(), b.land_tiles());
    }

    #[test]
    fn test_determinism_with_zones() {
        let footprints = (0..3).map(|i| ZoneFootprint::new(format!("m{}", i), 15, 15)).collect();
        let config = scenario_config(100, 100, 77).with_footprints(footprints);
        let a = generate_map(config.clone()).unwrap();
        let b = generate_map(config).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.zones, b.zones);
    }

    #[test]
    fn test_single_component_and_non_empty() {
        for seed in [1, 2, 3, 42, 1234, 9999] {
            let footprints = (0..3).map(|i| ZoneFootprint::new(format!("m{}", i), 15, 15)).collect();
            let map = generate_map(scenario_config(80, 60, seed).with_footprints(footprints)).unwrap();
            assert!(count_land(&map.grid) >= 1, "seed {}", seed);
            assert_eq!(find_land_components(&map.grid).len(), 1, "seed {}", seed);
        }
    }

    #[test]
    fn test_zone_scenario_spacing_and_ratio() {
        let footprints: Vec<ZoneFootprint> =
            (0..3).map(|i| ZoneFootprint::new(format!("zone{}", i), 15, 15)).collect();
        let mut config = scenario_config(100, 100, 2024).with_footprints(footprints);
        config.zones.spacing = 20.0;
        let map = generate_map(config.clone()).unwrap();

        assert!(map.zones.len() <= 3);
        assert_eq!(map.zones.len() + map.skipped_zones.len(), 3);
        for (i, a) in map.zones.iter().enumerate() {
            let ratio = land_ratio(&map.grid, a.center, &a.footprint(), config.zones.buffer);
            assert!(ratio >= 0.7, "zone {} ratio {}", a.id, ratio);
            for b in &map.zones[i + 1..] {
                assert!(a.center.distance(&b.center) >= 20.0);
            }
        }
    }

    #[test]
    fn test_impossible_threshold_uses_fallback_disk() {
        let mut config = scenario_config(60, 40, 5);
        config.noise.continent_threshold = 1.1;
        let map = generate_map(config).unwrap();

        assert!(map.connectivity.used_fallback);
        assert!(count_land(&map.grid) > 0);
        let radius = fallback_radius(60, 40);
        assert_eq!(radius, 10.0);
        for (x, y, tile) in map.grid.iter() {
            let d = ((x as f32 - 30.0).powi(2) + (y as f32 - 20.0).powi(2)).sqrt();
            assert_eq!(tile.is_land(), d < radius);
        }
    }

    #[test]
    fn test_spawn_always_on_land() {
        let map = generate_map(scenario_config(64, 64, 31)).unwrap();
        let spawn = map.spawn();
        for (x, z) in [(0.0, 0.0), (63.0, 63.0), (-20.0, 500.0), (32.0, 10.0)] {
            let pos = spawn.find_spawn_near(WorldPosition::new(x, 0.0, z));
            assert!(spawn.is_land_at(pos));
        }
        assert!(spawn.is_land_at(spawn.player_spawn_position()));
        assert!(!spawn.is_land(-1, 0));
        assert!(!spawn.is_land(64, 0));
    }

    #[test]
    fn test_zero_seed_is_resolved_and_stored() {
        let mut generator = MapGenerator::new(scenario_config(20, 20, 0)).unwrap();
        let first = generator.generate();
        assert_ne!(first.seed, 0);
        assert_eq!(generator.config().seed, first.seed);
        let second = generator.generate();
        assert_eq!(first.grid, second.grid);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = scenario_config(0, 10, 1);
        assert!(matches!(
            MapGenerator::new(config),
            Err(MapError::InvalidDimensions { .. })
        ));
    }
}
