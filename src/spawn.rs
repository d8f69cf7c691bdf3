//! Random sources for particle initialization and reseeding.
//!
//! All randomness in the animation flows through here: initial positions,
//! colour offsets and the divergence guard's replacement states. Seed the
//! context to make a run reproducible.

use glam::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

/// Uniform sample from the cube `[-half_extent, half_extent]^3`.
///
/// Each coordinate is drawn independently.
pub fn sample_cube<R: Rng + ?Sized>(rng: &mut R, half_extent: f64) -> DVec3 {
    DVec3::new(
        rng.gen_range(-half_extent..=half_extent),
        rng.gen_range(-half_extent..=half_extent),
        rng.gen_range(-half_extent..=half_extent),
    )
}

/// Three independent integer draws from `range`.
pub fn sample_offset<R: Rng + ?Sized>(rng: &mut R, range: RangeInclusive<u8>) -> [u8; 3] {
    [
        rng.gen_range(range.clone()),
        rng.gen_range(range.clone()),
        rng.gen_range(range),
    ]
}

/// Owner of the simulation's random number generator.
///
/// ```ignore
/// let mut ctx = SpawnContext::seeded(7);
/// let start = ctx.random_in_cube(3.0);
/// let offset = ctx.random_offset(0..=30);
/// ```
#[derive(Debug, Clone)]
pub struct SpawnContext {
    rng: StdRng,
}

impl SpawnContext {
    /// Context seeded from operating-system entropy; runs differ each time.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Context with a fixed seed for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when `seed` is given, entropy-seeded otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Random point inside a cube of given half-size, centered at origin.
    #[inline]
    pub fn random_in_cube(&mut self, half_extent: f64) -> DVec3 {
        sample_cube(&mut self.rng, half_extent)
    }

    /// Random per-channel colour offset.
    #[inline]
    pub fn random_offset(&mut self, range: RangeInclusive<u8>) -> [u8; 3] {
        sample_offset(&mut self.rng, range)
    }

    /// Direct access to the generator, for the divergence guard.
    #[inline]
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl Default for SpawnContext {
    fn default() -> Self {
        Self::from_entropy()
    }
}
