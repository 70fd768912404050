//! Profiling tool to time each generation stage

use std::time::Instant;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use island_generator::{connectivity, grid, noise_field, zones};
use island_generator::{MapConfig, ZoneFootprint};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let width = 1024;
    let height = 1024;
    let seed = 1337u64;

    let config = MapConfig::default()
        .with_size(width, height)
        .with_seed(seed)
        .with_footprints(
            (0..12)
                .map(|i| ZoneFootprint::new(format!("zone_{}", i), 25, 25))
                .collect(),
        );

    println!("=== Performance Profiling ===");
    println!("Map size: {}x{} ({} cells)", width, height, width * height);
    println!();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let start = Instant::now();
    let mut map = noise_field::generate_noise_field(width, height, &config.noise, &mut rng);
    println!("Noise field: {:?} ({} land)", start.elapsed(), grid::count_land(&map));

    let start = Instant::now();
    let components = connectivity::find_land_components(&map);
    println!("Component search: {:?} ({} components)", start.elapsed(), components.len());

    let start = Instant::now();
    let report = connectivity::keep_largest_component(&mut map);
    println!("Connectivity filter: {:?} (kept {})", start.elapsed(), report.kept_cells);

    let start = Instant::now();
    let placement = zones::place_zones(&mut map, &config.footprints, &config.zones, &mut rng);
    println!(
        "Zone placement: {:?} ({} placed, {} skipped)",
        start.elapsed(),
        placement.placed.len(),
        placement.skipped.len()
    );

    let start = Instant::now();
    let land = grid::land_cells(&map);
    println!("Land list: {:?} ({} tiles)", start.elapsed(), land.len());
}
