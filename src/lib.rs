//! # Halvorsen - chaotic attractor particle animation
//!
//! A fixed population of point particles follows a three-dimensional
//! chaotic flow. Every frame each particle is advanced by one explicit Euler
//! step, projected orthographically onto the screen, and drawn as a filled
//! disc whose colour is shifted by its depth.
//!
//! ## Quick Start
//!
//! ```ignore
//! use halvorsen::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     Simulation::new()
//!         .with_particle_count(1000)
//!         .with_coefficient(1.89)
//!         .with_target_fps(60)
//!         .run()
//! }
//! ```
//!
//! ## Per-frame pipeline
//!
//! For every particle, in order:
//!
//! 1. [`DivergenceGuard::check`] inspects the current position. If any
//!    coordinate's magnitude exceeds the bound (100), the position is
//!    replaced by a fresh sample from `[-3, 3]^3`.
//! 2. [`Integrator::advance`] takes one Euler step of size `tick / 5000`
//!    from that position. The tick is a fixed nominal frame duration (16),
//!    never the measured one.
//! 3. [`depth_color`] adds the particle's fixed [`ColorProfile`] offset and
//!    `z * 5` to the base colour.
//! 4. [`Projection::project`] maps `(x, y)` to pixels; `z` only affects
//!    colour.
//!
//! All updates finish before any disc is drawn.
//!
//! ## Other flows
//!
//! [`Lorenz`], [`Aizawa`] and [`Thomas`] ship with the crate:
//!
//! ```ignore
//! Simulation::new()
//!     .with_attractor(Lorenz::default())
//!     .with_projection(15.0, DVec2::ZERO)
//!     .run()?;
//! ```
//!
//! Implement [`Attractor`] to drive the same pipeline with any other vector
//! field:
//!
//! ```ignore
//! #[derive(Clone)]
//! struct Rossler { a: f64, b: f64, c: f64 }
//!
//! impl Attractor for Rossler {
//!     fn derivative(&self, p: DVec3) -> DVec3 {
//!         DVec3::new(
//!             -p.y - p.z,
//!             p.x + self.a * p.y,
//!             self.b + p.z * (p.x - self.c),
//!         )
//!     }
//! }
//!
//! Simulation::new().with_attractor(Rossler { a: 0.2, b: 0.2, c: 5.7 }).run()?;
//! ```

pub mod attractor;
pub mod color;
pub mod config;
pub mod error;
mod gpu;
pub mod guard;
pub mod input;
pub mod particle;
pub mod population;
pub mod projection;
pub mod shader;
mod simulation;
pub mod spawn;
pub mod time;

pub use attractor::{euler_step, Aizawa, Attractor, Halvorsen, Integrator, Lorenz, Thomas};
pub use color::{depth_color, Rgb};
pub use config::SimConfig;
pub use error::{GpuError, SimulationError};
pub use glam::{DVec2, DVec3};
pub use guard::{Divergence, DivergenceGuard};
pub use particle::{ColorProfile, Particle};
pub use population::{next_position, Population, StepReport};
pub use projection::{Disc, Projection};
pub use simulation::Simulation;
pub use spawn::SpawnContext;

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use halvorsen::prelude::*;
/// ```
pub mod prelude {
    pub use crate::attractor::{Aizawa, Attractor, Halvorsen, Lorenz, Thomas};
    pub use crate::color::Rgb;
    pub use crate::config::SimConfig;
    pub use crate::error::SimulationError;
    pub use crate::simulation::Simulation;
    pub use crate::{DVec2, DVec3};
}
