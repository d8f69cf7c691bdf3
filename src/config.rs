//! Simulation configuration.
//!
//! Every constant of the reference animation lives here so it can be
//! changed at start-up. [`SimConfig::default`] reproduces the reference
//! configuration exactly.

use std::ops::RangeInclusive;

use glam::DVec2;

use crate::attractor::{DEFAULT_COEFFICIENT, DEFAULT_STEP_DIVISOR, DEFAULT_TICK};
use crate::color::{Rgb, DEFAULT_BASE_COLOR, DEFAULT_DEPTH_SCALE};
use crate::error::SimulationError;
use crate::guard::{DivergenceGuard, DEFAULT_BOUND, DEFAULT_RESEED_EXTENT};
use crate::projection::{Projection, DEFAULT_DIAMETER, DEFAULT_OFFSET, DEFAULT_SCALE};
use crate::shader::DiscInstance;

/// Start-time parameters of a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Number of particles; fixed for the lifetime of the run.
    pub particle_count: u32,
    /// Attractor coefficient `a`.
    pub coefficient: f64,
    /// Nominal frame duration passed to the integrator every frame.
    pub tick: f64,
    /// `dt = tick / step_divisor`.
    pub step_divisor: f64,
    /// Per-axis magnitude beyond which a particle is reseeded.
    pub divergence_bound: f64,
    /// Half-extent of the cube initial and reseeded positions are drawn from.
    pub spawn_extent: f64,
    /// Shared base colour on the 0-255 scale.
    pub base_color: Rgb,
    /// Range each per-particle channel offset is drawn from.
    pub color_offset: RangeInclusive<u8>,
    /// Colour shift per unit of depth.
    pub depth_scale: f64,
    /// Pixels per attractor unit.
    pub projection_scale: f64,
    /// Pixel offset added after centring.
    pub projection_offset: DVec2,
    /// Disc diameter in pixels.
    pub diameter: f64,
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
    /// Frame-rate cap.
    pub target_fps: u32,
    /// Clear colour.
    pub background: Rgb,
    /// Window title.
    pub title: String,
    /// RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            particle_count: 1000,
            coefficient: DEFAULT_COEFFICIENT,
            tick: DEFAULT_TICK,
            step_divisor: DEFAULT_STEP_DIVISOR,
            divergence_bound: DEFAULT_BOUND,
            spawn_extent: DEFAULT_RESEED_EXTENT,
            base_color: DEFAULT_BASE_COLOR,
            color_offset: 0..=30,
            depth_scale: DEFAULT_DEPTH_SCALE,
            projection_scale: DEFAULT_SCALE,
            projection_offset: DEFAULT_OFFSET,
            diameter: DEFAULT_DIAMETER,
            width: 1920,
            height: 1080,
            target_fps: 60,
            background: Rgb::BLACK,
            title: "yes i am".to_string(),
            seed: None,
        }
    }
}

impl SimConfig {
    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), SimulationError> {
        fn invalid(msg: String) -> Result<(), SimulationError> {
            Err(SimulationError::InvalidConfig(msg))
        }

        if self.particle_count == 0 {
            return invalid("particle_count must be at least 1".into());
        }
        // Device is requested with default limits.
        let max_count = DiscInstance::max_count(wgpu::Limits::default().max_buffer_size);
        if u64::from(self.particle_count) > max_count {
            return invalid(format!(
                "particle_count {} exceeds the renderer limit of {}",
                self.particle_count, max_count
            ));
        }
        if self.width == 0 || self.height == 0 {
            return invalid(format!(
                "screen size must be non-zero, got {}x{}",
                self.width, self.height
            ));
        }
        if self.target_fps == 0 {
            return invalid("target_fps must be at least 1".into());
        }
        if !(self.step_divisor.is_finite() && self.step_divisor > 0.0) {
            return invalid(format!(
                "step_divisor must be positive, got {}",
                self.step_divisor
            ));
        }
        if !(self.tick.is_finite() && self.tick >= 0.0) {
            return invalid(format!("tick must be non-negative, got {}", self.tick));
        }
        if !(self.divergence_bound.is_finite() && self.divergence_bound > 0.0) {
            return invalid(format!(
                "divergence_bound must be positive, got {}",
                self.divergence_bound
            ));
        }
        if !(self.spawn_extent.is_finite() && self.spawn_extent >= 0.0) {
            return invalid(format!(
                "spawn_extent must be non-negative, got {}",
                self.spawn_extent
            ));
        }
        if self.spawn_extent > self.divergence_bound {
            return invalid(format!(
                "spawn_extent {} exceeds divergence_bound {}",
                self.spawn_extent, self.divergence_bound
            ));
        }
        if self.color_offset.is_empty() {
            return invalid(format!("color_offset range {:?} is empty", self.color_offset));
        }
        if !self.coefficient.is_finite() {
            return invalid(format!("coefficient must be finite, got {}", self.coefficient));
        }
        if !(self.diameter.is_finite() && self.diameter > 0.0) {
            return invalid(format!("diameter must be positive, got {}", self.diameter));
        }
        Ok(())
    }

    /// Guard built from the bound and spawn extent.
    pub fn guard(&self) -> DivergenceGuard {
        DivergenceGuard::new(self.divergence_bound, self.spawn_extent)
    }

    /// Projection onto the configured screen.
    pub fn projection(&self) -> Projection {
        Projection {
            scale: self.projection_scale,
            offset: self.projection_offset,
            diameter: self.diameter,
            ..Projection::new(self.width, self.height)
        }
    }
}
