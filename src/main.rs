use clap::Parser;

use island_generator::{ascii, map_export, materialize};
use island_generator::{MapConfig, MapError, MapGenerator, ZoneFootprint};

#[derive(Parser, Debug)]
#[command(name = "island_generator")]
#[command(about = "Generate procedural island maps with mission zones")]
struct Args {
    /// JSON configuration file (flags below override its values)
    #[arg(short, long)]
    config: Option<String>,

    /// Width of the map in tiles
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the map in tiles
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Random seed (0 or unset picks one)
    #[arg(short, long)]
    seed: Option<u64>,

    /// World units per tile
    #[arg(long)]
    tile_size: Option<f32>,

    /// Number of mission zones to request (replaces configured footprints)
    #[arg(short = 'z', long)]
    zones: Option<usize>,

    /// Side length of requested mission zones, in tiles
    #[arg(long, default_value = "15")]
    zone_size: usize,

    /// Minimum distance between mission zone centers, in tiles
    #[arg(long)]
    spacing: Option<f32>,

    /// Print the map as ASCII
    #[arg(long)]
    ascii: bool,

    /// Export a text map file (ASCII map, legend and zone list)
    #[arg(long)]
    export_text: Option<String>,

    /// Export the minimap to PNG
    #[arg(long)]
    export_png: Option<String>,

    /// Pixels per tile for the PNG export
    #[arg(long, default_value = "4")]
    png_scale: u32,

    /// Export map data as JSON
    #[arg(long)]
    export_json: Option<String>,
}

fn build_config(args: &Args) -> Result<MapConfig, MapError> {
    let mut config = match &args.config {
        Some(path) => MapConfig::from_json_file(path)?,
        None => MapConfig::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(tile_size) = args.tile_size {
        config.tile_size = tile_size;
    }
    if let Some(spacing) = args.spacing {
        config.zones.spacing = spacing;
    }
    if let Some(count) = args.zones {
        config.footprints = (0..count)
            .map(|i| ZoneFootprint::new(format!("zone_{}", i + 1), args.zone_size, args.zone_size))
            .collect();
    }

    Ok(config)
}

fn run(args: Args) -> Result<(), MapError> {
    let config = build_config(&args)?;
    let mut generator = MapGenerator::new(config)?;

    let seed = generator.resolve_seed();
    println!("Generating island with seed: {}", seed);
    println!("Map size: {}x{}", generator.config().width, generator.config().height);

    let map = generator.generate();

    let total = map.width() * map.height();
    let land = map.land_tiles().len();
    println!(
        "Land: {} tiles ({:.1}%), {} components before filtering{}",
        land,
        100.0 * land as f64 / total as f64,
        map.connectivity.component_count,
        if map.connectivity.used_fallback { " (fallback island)" } else { "" }
    );
    println!(
        "Mission zones placed: {} of {}",
        map.zones.len(),
        map.zones.len() + map.skipped_zones.len()
    );
    for zone in &map.zones {
        let pos = zone.world_center(map.tile_size);
        println!("  {} at tile ({}, {}) world ({:.1}, {:.1})", zone.id, zone.center.x, zone.center.y, pos.x, pos.z);
    }
    for skipped in &map.skipped_zones {
        println!("  {} could not be placed", skipped.id);
    }

    let spawn = map.spawn().player_spawn_position();
    println!("Player spawn: ({:.1}, {:.1})", spawn.x, spawn.z);

    struct Counter(usize);
    impl materialize::TileSink for Counter {
        fn place_tile(&mut self, placement: &materialize::TilePlacement) {
            if placement.kind == materialize::TileKind::WaterWall {
                self.0 += 1;
            }
        }
    }
    let mut walls = Counter(0);
    materialize::materialize(&map, &mut walls);
    println!("Water walls: {}", walls.0);

    if args.ascii {
        println!();
        print!("{}", ascii::render_ascii_map(&map.grid, &map.zones));
        print!("{}", ascii::legend());
    }

    if let Some(ref path) = args.export_text {
        ascii::export_map_file(&map, path)?;
        println!("Exported text map to {}", path);
    }

    if let Some(ref path) = args.export_png {
        map_export::export_minimap(&map, path, args.png_scale)?;
        println!("Exported minimap to {}", path);
    }

    if let Some(ref path) = args.export_json {
        map_export::export_json(&map, path)?;
        println!("Exported map data to {}", path);
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
