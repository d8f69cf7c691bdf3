//! Divergence detection and recovery.
//!
//! A trajectory that wanders outside the bounding box is not an error. The
//! guard inspects the state *before* integration and, when it has escaped,
//! substitutes a fresh bounded sample that the integrator then advances in
//! the same frame.

use glam::DVec3;
use rand::Rng;

use crate::spawn::sample_cube;

/// Reference magnitude above which any coordinate counts as diverged.
pub const DEFAULT_BOUND: f64 = 100.0;

/// Reference half-extent of the reseed cube.
pub const DEFAULT_RESEED_EXTENT: f64 = 3.0;

/// A detected divergence, carrying the state that tripped the guard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Divergence {
    /// The escaped position.
    pub position: DVec3,
}

/// Bounds check plus reseed policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DivergenceGuard {
    /// Per-axis magnitude limit.
    pub bound: f64,
    /// Half-extent of the cube replacement states are drawn from.
    pub reseed_extent: f64,
}

impl DivergenceGuard {
    /// Create a guard with the given limit and reseed extent.
    pub fn new(bound: f64, reseed_extent: f64) -> Self {
        Self {
            bound,
            reseed_extent,
        }
    }

    /// Returns `Some` when any coordinate's magnitude exceeds the bound.
    ///
    /// Non-finite coordinates also count as diverged, since NaN would
    /// otherwise compare false and stick forever.
    #[inline]
    pub fn check(&self, position: DVec3) -> Option<Divergence> {
        let within = position.x.abs() <= self.bound
            && position.y.abs() <= self.bound
            && position.z.abs() <= self.bound;
        if within {
            None
        } else {
            Some(Divergence { position })
        }
    }

    /// Draw a replacement state uniformly from the reseed cube.
    #[inline]
    pub fn resample<R: Rng + ?Sized>(&self, rng: &mut R) -> DVec3 {
        sample_cube(rng, self.reseed_extent)
    }

    /// The state integration should start from this frame.
    ///
    /// Returns the untouched `position` and `None` when it is in bounds,
    /// otherwise a fresh sample and the divergence that caused it.
    pub fn stabilize<R: Rng + ?Sized>(
        &self,
        position: DVec3,
        rng: &mut R,
    ) -> (DVec3, Option<Divergence>) {
        match self.check(position) {
            None => (position, None),
            Some(divergence) => (self.resample(rng), Some(divergence)),
        }
    }
}

impl Default for DivergenceGuard {
    fn default() -> Self {
        Self::new(DEFAULT_BOUND, DEFAULT_RESEED_EXTENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_check_inside_bound() {
        let guard = DivergenceGuard::default();
        assert!(guard.check(DVec3::ZERO).is_none());
        assert!(guard.check(DVec3::new(99.9, -99.9, 50.0)).is_none());
    }

    #[test]
    fn test_check_exactly_on_bound_does_not_fire() {
        let guard = DivergenceGuard::default();
        assert!(guard.check(DVec3::new(100.0, -100.0, 100.0)).is_none());
    }

    #[test]
    fn test_check_fires_on_any_axis() {
        let guard = DivergenceGuard::default();
        for p in [
            DVec3::new(100.5, 0.0, 0.0),
            DVec3::new(0.0, -101.0, 0.0),
            DVec3::new(0.0, 0.0, 1e9),
        ] {
            let d = guard.check(p).expect("guard should fire");
            assert_eq!(d.position, p);
        }
    }

    #[test]
    fn test_check_fires_on_non_finite() {
        let guard = DivergenceGuard::default();
        assert!(guard.check(DVec3::new(f64::NAN, 0.0, 0.0)).is_some());
        assert!(guard.check(DVec3::new(0.0, f64::INFINITY, 0.0)).is_some());
    }

    #[test]
    fn test_stabilize_keeps_in_bound_state() {
        let guard = DivergenceGuard::default();
        let mut rng = StdRng::seed_from_u64(9);
        let p = DVec3::new(12.0, -40.0, 3.5);
        let (base, divergence) = guard.stabilize(p, &mut rng);
        assert_eq!(base, p);
        assert!(divergence.is_none());
    }

    #[test]
    fn test_stabilize_reseeds_into_cube() {
        let guard = DivergenceGuard::default();
        let mut rng = StdRng::seed_from_u64(10);
        for _ in 0..1000 {
            let (base, divergence) = guard.stabilize(DVec3::new(0.0, 250.0, 0.0), &mut rng);
            assert!(divergence.is_some());
            assert!(base.abs().max_element() <= 3.0);
        }
    }
}
