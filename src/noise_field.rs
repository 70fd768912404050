//! Two-layer coherent noise land/water classification
//!
//! A large-scale continent layer is attenuated by a smaller hole layer:
//! `value = continent * (1 - hole * hole_weight)`, land where
//! `value > continent_threshold`.

use noise::{NoiseFn, Perlin};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::config::NoiseParams;
use crate::grid::{Grid, TileType};

/// Upper bound for the random sampling offsets.
const MAX_OFFSET: f32 = 10_000.0;

/// Permutation seed for the shared Perlin table. Fixed so the noise is a
/// pure function of its coordinates; per-map variation comes from offsets.
const PERLIN_SEED: u32 = 0;

/// Coherent 2D noise remapped to [0, 1].
pub struct CoherentNoise {
    perlin: Perlin,
}

impl Default for CoherentNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl CoherentNoise {
    pub fn new() -> Self {
        Self {
            perlin: Perlin::new(PERLIN_SEED),
        }
    }

    pub fn sample(&self, x: f64, y: f64) -> f32 {
        let raw = self.perlin.get([x, y]);
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0) as f32
    }
}

/// Sampling offsets drawn from the seeded generator
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseOffsets {
    pub x: f32,
    pub y: f32,
}

impl NoiseOffsets {
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let x = rng.gen_range(0.0..MAX_OFFSET);
        let y = rng.gen_range(0.0..MAX_OFFSET);
        Self { x, y }
    }
}

/// Combined noise value for a single cell.
pub fn sample_cell(
    noise: &CoherentNoise,
    x: usize,
    y: usize,
    offsets: NoiseOffsets,
    params: &NoiseParams,
) -> f32 {
    let sx = x as f64 + offsets.x as f64;
    let sy = y as f64 + offsets.y as f64;

    // First layer: continent shape (large scale)
    let continent = noise.sample(
        sx / params.continent_scale as f64,
        sy / params.continent_scale as f64,
    );

    // Second layer: holes/lakes (smaller scale)
    let hole = noise.sample(
        sx / params.hole_scale as f64,
        sy / params.hole_scale as f64,
    );

    continent * (1.0 - hole * params.hole_weight)
}

/// Generate the raw land/water field.
///
/// Consumes exactly two draws from `rng` (the x and y offsets). Rows are
/// filled in parallel; each cell depends only on its coordinates, so the
/// result is identical to a sequential fill.
pub fn generate_noise_field<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    params: &NoiseParams,
    rng: &mut R,
) -> Grid {
    let offsets = NoiseOffsets::draw(rng);
    generate_with_offsets(width, height, params, offsets)
}

/// Standalone form: seed a fresh generator and build the field.
pub fn generate_from_seed(width: usize, height: usize, seed: u64, params: &NoiseParams) -> Grid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_noise_field(width, height, params, &mut rng)
}

/// Generate the field for explicit offsets.
pub fn generate_with_offsets(
    width: usize,
    height: usize,
    params: &NoiseParams,
    offsets: NoiseOffsets,
) -> Grid {
    let noise = CoherentNoise::new();
    let mut grid = Grid::new(width, height);
    if width == 0 {
        return grid;
    }

    grid.as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, tile) in row.iter_mut().enumerate() {
                let value = sample_cell(&noise, x, y, offsets, params);
                *tile = if value > params.continent_threshold {
                    TileType::Land
                } else {
                    TileType::Water
                };
            }
        });

    grid
}
