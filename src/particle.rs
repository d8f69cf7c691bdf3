//! Particle state and per-particle colour profiles.
//!
//! The two live in parallel collections owned by
//! [`Population`](crate::Population): index `i` of one always describes the
//! same particle as index `i` of the other.

use glam::DVec3;

/// A single point tracing the attractor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Current `(x, y, z)` coordinate. `z` is the depth used for shading.
    pub position: DVec3,
}

impl Particle {
    /// Create a particle at the given position.
    #[inline]
    pub fn new(position: DVec3) -> Self {
        Self { position }
    }

    /// Depth coordinate.
    #[inline]
    pub fn depth(&self) -> f64 {
        self.position.z
    }
}

/// Fixed RGB offset added to the shared base colour.
///
/// Drawn once when the population is created and never regenerated, not even
/// when the owning particle is reseeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorProfile {
    /// Per-channel offset, `[r, g, b]`.
    pub offset: [u8; 3],
}

impl ColorProfile {
    /// Create a profile from explicit channel offsets.
    #[inline]
    pub fn new(offset: [u8; 3]) -> Self {
        Self { offset }
    }
}
