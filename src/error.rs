//! Error types for map generation

use thiserror::Error;

/// Errors surfaced by the map generator and its exports
#[derive(Debug, Error)]
pub enum MapError {
    #[error("invalid map dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: usize, height: usize },

    #[error("invalid tile size {0}: must be a positive finite number")]
    InvalidTileSize(f32),

    #[error("invalid noise parameter {name} = {value}")]
    InvalidNoiseParameter { name: &'static str, value: f32 },

    #[error("invalid zone placement parameter: {0}")]
    InvalidZoneParameter(String),

    #[error("zone footprint '{id}' has invalid size {width}x{height}")]
    InvalidFootprint { id: String, width: usize, height: usize },

    #[error("no land tiles available")]
    NoLandAvailable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MapError {
    /// Configuration errors abort generation before any grid exists.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            MapError::InvalidDimensions { .. }
                | MapError::InvalidTileSize(_)
                | MapError::InvalidNoiseParameter { .. }
                | MapError::InvalidZoneParameter(_)
                | MapError::InvalidFootprint { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
