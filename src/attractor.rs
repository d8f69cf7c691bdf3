//! Attractor dynamics and the fixed-step Euler integrator.
//!
//! The default system is a cyclically symmetric quadratic flow:
//!
//! ```text
//! dx/dt = -a*x - 4*y - 4*z - y^2
//! dy/dt = -a*y - 4*z - 4*x - z^2
//! dz/dt = -a*z - 4*x - 4*y - x^2
//! ```
//!
//! With `a = 1.89` trajectories wind around a three-lobed chaotic attractor.
//! Each frame advances every particle by one explicit Euler step of size
//! `tick / step_divisor`, where `tick` is a nominal frame duration (16 ms in
//! the reference configuration) and does not track wall-clock time.
//!
//! [`Lorenz`], [`Aizawa`] and [`Thomas`] are also provided and can be chosen
//! when the simulation is built. They have their own natural scales, so pair
//! them with a suitable projection scale and divergence bound:
//!
//! | Flow | Typical extent | Bound | Base colour |
//! |---|---|---|---|
//! | [`Halvorsen`] | ~12 | 100 | (150, 100, 150) |
//! | [`Lorenz`] | ~50 | 60 | (240, 100, 100) |
//! | [`Aizawa`] | ~2 | 20 | (230, 220, 0) |
//! | [`Thomas`] | ~5 | 10 | (160, 80, 230) |

use glam::DVec3;

/// Reference coefficient for [`Halvorsen`].
pub const DEFAULT_COEFFICIENT: f64 = 1.89;

/// Reference nominal frame duration fed to the integrator.
pub const DEFAULT_TICK: f64 = 16.0;

/// Reference divisor turning a tick into an integration step (`dt = tick / 5000`).
pub const DEFAULT_STEP_DIVISOR: f64 = 5000.0;

/// A continuous three-dimensional dynamical system.
///
/// Implementors only describe the vector field; integration is handled by
/// [`Integrator`].
pub trait Attractor: Send + Sync {
    /// Time derivative of the state at `p`.
    fn derivative(&self, p: DVec3) -> DVec3;

    /// Short human-readable name, used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Halvorsen-style cyclic quadratic flow with a single coefficient `a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Halvorsen {
    /// Linear damping coefficient.
    pub a: f64,
}

impl Halvorsen {
    /// Create the flow with the given coefficient.
    pub fn new(a: f64) -> Self {
        Self { a }
    }
}

impl Default for Halvorsen {
    fn default() -> Self {
        Self::new(DEFAULT_COEFFICIENT)
    }
}

impl Attractor for Halvorsen {
    #[inline]
    fn derivative(&self, p: DVec3) -> DVec3 {
        let a = self.a;
        DVec3::new(
            -a * p.x - 4.0 * p.y - 4.0 * p.z - p.y * p.y,
            -a * p.y - 4.0 * p.z - 4.0 * p.x - p.z * p.z,
            -a * p.z - 4.0 * p.x - 4.0 * p.y - p.x * p.x,
        )
    }

    fn name(&self) -> &str {
        "halvorsen"
    }
}

/// The Lorenz system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lorenz {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
}

impl Default for Lorenz {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
        }
    }
}

impl Attractor for Lorenz {
    #[inline]
    fn derivative(&self, p: DVec3) -> DVec3 {
        DVec3::new(
            self.sigma * (p.y - p.x),
            p.x * (self.rho - p.z) - p.y,
            p.x * p.y - self.beta * p.z,
        )
    }

    fn name(&self) -> &str {
        "lorenz"
    }
}

/// The Aizawa system: a sphere-like attractor with a tube along `z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aizawa {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Aizawa {
    fn default() -> Self {
        Self {
            a: 0.95,
            b: 0.7,
            c: 0.6,
            d: 3.5,
            e: 0.25,
            f: 0.1,
        }
    }
}

impl Attractor for Aizawa {
    #[inline]
    fn derivative(&self, p: DVec3) -> DVec3 {
        let DVec3 { x, y, z } = p;
        DVec3::new(
            (z - self.b) * x - self.d * y,
            self.d * x + (z - self.b) * y,
            self.c + self.a * z - z * z * z / 3.0 - (x * x + y * y) * (1.0 + self.e * z)
                + self.f * z * x * x * x,
        )
    }

    fn name(&self) -> &str {
        "aizawa"
    }
}

/// Thomas' cyclically symmetric attractor with damping `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thomas {
    pub b: f64,
}

impl Default for Thomas {
    fn default() -> Self {
        Self { b: 0.208186 }
    }
}

impl Attractor for Thomas {
    #[inline]
    fn derivative(&self, p: DVec3) -> DVec3 {
        DVec3::new(
            p.y.sin() - self.b * p.x,
            p.z.sin() - self.b * p.y,
            p.x.sin() - self.b * p.z,
        )
    }

    fn name(&self) -> &str {
        "thomas"
    }
}

/// One explicit Euler step: `p + dt * f(p)`.
#[inline]
pub fn euler_step<A: Attractor + ?Sized>(attractor: &A, p: DVec3, dt: f64) -> DVec3 {
    p + attractor.derivative(p) * dt
}

/// Fixed-step integrator pairing an attractor with its tick-to-step scaling.
#[derive(Debug, Clone)]
pub struct Integrator<A: Attractor> {
    attractor: A,
    step_divisor: f64,
}

impl<A: Attractor> Integrator<A> {
    /// Create an integrator whose step is `tick / step_divisor`.
    pub fn new(attractor: A, step_divisor: f64) -> Self {
        Self {
            attractor,
            step_divisor,
        }
    }

    /// The underlying vector field.
    pub fn attractor(&self) -> &A {
        &self.attractor
    }

    /// Integration step size for a nominal frame duration.
    #[inline]
    pub fn dt(&self, tick: f64) -> f64 {
        tick / self.step_divisor
    }

    /// Advance `p` by one frame of nominal duration `tick`.
    ///
    /// Pure: the same inputs always produce the same output.
    #[inline]
    pub fn advance(&self, p: DVec3, tick: f64) -> DVec3 {
        euler_step(&self.attractor, p, self.dt(tick))
    }
}

impl Default for Integrator<Halvorsen> {
    fn default() -> Self {
        Self::new(Halvorsen::default(), DEFAULT_STEP_DIVISOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivative_at_origin_is_zero() {
        let flow = Halvorsen::default();
        assert_eq!(flow.derivative(DVec3::ZERO), DVec3::ZERO);
    }

    #[test]
    fn test_derivative_matches_equations() {
        let flow = Halvorsen::new(1.89);
        let d = flow.derivative(DVec3::new(1.0, 2.0, 3.0));

        // -1.89 - 8 - 12 - 4
        assert!((d.x - (-25.89)).abs() < 1e-12);
        // -3.78 - 12 - 4 - 9
        assert!((d.y - (-28.78)).abs() < 1e-12);
        // -5.67 - 4 - 8 - 1
        assert!((d.z - (-18.67)).abs() < 1e-12);
    }

    #[test]
    fn test_dt_from_reference_tick() {
        let integrator = Integrator::default();
        assert!((integrator.dt(DEFAULT_TICK) - 0.0032).abs() < 1e-15);
    }

    #[test]
    fn test_advance_single_step() {
        let integrator = Integrator::default();
        let p = DVec3::new(1.0, 0.0, 0.0);
        let next = integrator.advance(p, 16.0);

        // f(1,0,0) = (-1.89, -4, -5)
        let dt = 16.0 / 5000.0;
        assert!((next.x - (1.0 - 1.89 * dt)).abs() < 1e-12);
        assert!((next.y - (-4.0 * dt)).abs() < 1e-12);
        assert!((next.z - (-5.0 * dt)).abs() < 1e-12);
    }

    #[test]
    fn test_advance_is_deterministic() {
        let integrator = Integrator::default();
        let p = DVec3::new(-1.3, 2.7, 0.4);
        let first = integrator.advance(p, DEFAULT_TICK);
        for _ in 0..100 {
            assert_eq!(integrator.advance(p, DEFAULT_TICK), first);
        }
    }

    #[test]
    fn test_zero_tick_is_identity() {
        let integrator = Integrator::default();
        let p = DVec3::new(0.5, -0.25, 2.0);
        assert_eq!(integrator.advance(p, 0.0), p);
    }

    #[test]
    fn test_lorenz_derivative() {
        let flow = Lorenz::default();
        assert_eq!(flow.derivative(DVec3::ZERO), DVec3::ZERO);

        let d = flow.derivative(DVec3::new(1.0, 1.0, 1.0));
        assert_eq!(d.x, 0.0);
        assert_eq!(d.y, 26.0);
        assert!((d.z - (1.0 - 8.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_aizawa_derivative() {
        let flow = Aizawa::default();
        assert!((flow.derivative(DVec3::ZERO) - DVec3::new(0.0, 0.0, 0.6)).length() < 1e-12);

        let d = flow.derivative(DVec3::new(1.0, 0.0, 0.0));
        assert!((d.x - (-0.7)).abs() < 1e-12);
        assert!((d.y - 3.5).abs() < 1e-12);
        // 0.6 - (1 + 0) * 1
        assert!((d.z - (-0.4)).abs() < 1e-12);
    }

    #[test]
    fn test_thomas_derivative() {
        let flow = Thomas::default();
        assert_eq!(flow.derivative(DVec3::ZERO), DVec3::ZERO);

        let half_pi = std::f64::consts::FRAC_PI_2;
        let d = flow.derivative(DVec3::new(0.0, half_pi, 0.0));
        assert!((d.x - 1.0).abs() < 1e-12);
        assert!((d.y - (-0.208186 * half_pi)).abs() < 1e-12);
        assert!(d.z.abs() < 1e-12);
    }

    #[test]
    fn test_builtin_flows_stay_bounded() {
        fn max_extent<A: Attractor>(flow: A, start: DVec3, steps: usize) -> f64 {
            let integrator = Integrator::new(flow, DEFAULT_STEP_DIVISOR);
            let mut p = start;
            let mut extent: f64 = 0.0;
            for _ in 0..steps {
                p = integrator.advance(p, DEFAULT_TICK);
                assert!(p.is_finite());
                extent = extent.max(p.abs().max_element());
            }
            extent
        }

        let start = DVec3::new(0.5, -0.3, 0.2);
        assert!(max_extent(Lorenz::default(), start, 20_000) < 60.0);
        assert!(max_extent(Aizawa::default(), DVec3::new(0.1, 0.0, 0.0), 20_000) < 20.0);
        assert!(max_extent(Thomas::default(), start, 20_000) < 10.0);
    }

    #[test]
    fn test_names() {
        struct Custom;
        impl Attractor for Custom {
            fn derivative(&self, _p: DVec3) -> DVec3 {
                DVec3::ZERO
            }
        }

        assert_eq!(Halvorsen::default().name(), "halvorsen");
        assert_eq!(Lorenz::default().name(), "lorenz");
        assert_eq!(Aizawa::default().name(), "aizawa");
        assert_eq!(Thomas::default().name(), "thomas");
        assert!(Custom.name().ends_with("Custom"));
    }
}
