//! Island map generation library
//!
//! Generates a seeded land/water grid with a single connected landmass,
//! places mission zones on it and answers spawn queries afterwards.

pub mod ascii;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod generator;
pub mod grid;
pub mod map_export;
pub mod materialize;
pub mod noise_field;
pub mod signal;
pub mod spawn;
pub mod tilemap;
pub mod zones;

pub use config::{MapConfig, NoiseParams, ZonePlacementParams};
pub use error::MapError;
pub use generator::{generate_map, GeneratedMap, MapGenerator};
pub use grid::{Cell, Grid, TileType, WorldPosition};
pub use spawn::SpawnQueries;
pub use zones::{PlacedZone, ZoneFootprint};
