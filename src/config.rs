//! Generation configuration
//!
//! All values are read once when a `MapGenerator` is built and are immutable
//! afterwards. Defaults match the tuned values the game ships with.

use std::path::Path;

use crate::error::{MapError, Result};
use crate::zones::ZoneFootprint;

/// Two-layer coherent noise settings
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    /// Divisor for continent-shape sampling (larger = bigger landmasses)
    pub continent_scale: f32,
    /// Combined noise must exceed this to become land
    pub continent_threshold: f32,
    /// Divisor for hole/lake sampling
    pub hole_scale: f32,
    /// How strongly the hole layer carves into the continent layer
    pub hole_weight: f32,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            continent_scale: 20.0,
            continent_threshold: 0.4,
            hole_scale: 10.0,
            hole_weight: 0.3,
        }
    }
}

impl NoiseParams {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("continent_scale", self.continent_scale),
            ("hole_scale", self.hole_scale),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(MapError::InvalidNoiseParameter { name, value });
            }
        }
        for (name, value) in [
            ("continent_threshold", self.continent_threshold),
            ("hole_weight", self.hole_weight),
        ] {
            if !value.is_finite() {
                return Err(MapError::InvalidNoiseParameter { name, value });
            }
        }
        Ok(())
    }
}

/// Rejection-sampling settings for mission zones
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ZonePlacementParams {
    /// Minimum center-to-center distance between zones, in cells
    pub spacing: f32,
    /// Candidate draws per footprint before it is skipped
    pub max_attempts: usize,
    /// Margin in cells scored around the footprint
    pub buffer: usize,
    /// Required land fraction of the buffered footprint (0..=1)
    pub min_land_ratio: f32,
}

impl Default for ZonePlacementParams {
    fn default() -> Self {
        Self {
            spacing: 20.0,
            max_attempts: 100,
            buffer: 3,
            min_land_ratio: 0.7,
        }
    }
}

impl ZonePlacementParams {
    pub fn validate(&self) -> Result<()> {
        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(MapError::InvalidZoneParameter(format!(
                "spacing must be non-negative, got {}",
                self.spacing
            )));
        }
        if self.max_attempts == 0 {
            return Err(MapError::InvalidZoneParameter(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_land_ratio) {
            return Err(MapError::InvalidZoneParameter(format!(
                "min_land_ratio must be within 0..=1, got {}",
                self.min_land_ratio
            )));
        }
        Ok(())
    }
}

/// Full map generation configuration
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Map width in tiles
    pub width: usize,
    /// Map height in tiles
    pub height: usize,
    /// World units per tile
    pub tile_size: f32,
    /// Random seed (0 = pick one and report it)
    pub seed: u64,
    pub noise: NoiseParams,
    pub zones: ZonePlacementParams,
    /// Mission zone footprints, placed in order
    pub footprints: Vec<ZoneFootprint>,
    /// Collider height for water walls in the materialization plan
    pub water_wall_height: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            tile_size: 1.0,
            seed: 0,
            noise: NoiseParams::default(),
            zones: ZonePlacementParams::default(),
            footprints: Vec::new(),
            water_wall_height: 5.0,
        }
    }
}

impl MapConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_footprints(mut self, footprints: Vec<ZoneFootprint>) -> Self {
        self.footprints = footprints;
        self
    }

    /// Reject configurations that cannot produce a map.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MapError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !self.tile_size.is_finite() || self.tile_size <= 0.0 {
            return Err(MapError::InvalidTileSize(self.tile_size));
        }
        self.noise.validate()?;
        self.zones.validate()?;
        for footprint in &self.footprints {
            if footprint.width == 0 || footprint.height == 0 {
                return Err(MapError::InvalidFootprint {
                    id: footprint.id.clone(),
                    width: footprint.width,
                    height: footprint.height,
                });
            }
        }
        Ok(())
    }
}
