//! The simulation context: particles, their colour profiles, and the
//! machinery that advances them one frame at a time.

use glam::DVec3;
use rand::Rng;

use crate::attractor::{Attractor, Halvorsen, Integrator};
use crate::color::{depth_color, Rgb};
use crate::config::SimConfig;
use crate::guard::{Divergence, DivergenceGuard};
use crate::particle::{ColorProfile, Particle};
use crate::projection::{Disc, Projection};
use crate::spawn::SpawnContext;

/// Guard-then-integrate for a single state.
///
/// The guard runs on the pre-update position; if it fires, integration
/// starts from the resampled state within the same call.
pub fn next_position<A, R>(
    integrator: &Integrator<A>,
    guard: &DivergenceGuard,
    position: DVec3,
    tick: f64,
    rng: &mut R,
) -> (DVec3, Option<Divergence>)
where
    A: Attractor,
    R: Rng + ?Sized,
{
    let (base, divergence) = guard.stabilize(position, rng);
    (integrator.advance(base, tick), divergence)
}

/// Summary of one update pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Particles the guard reseeded this frame.
    pub reseeded: usize,
}

/// Fixed-size particle population with parallel colour profiles.
pub struct Population<A: Attractor = Halvorsen> {
    particles: Vec<Particle>,
    profiles: Vec<ColorProfile>,
    integrator: Integrator<A>,
    guard: DivergenceGuard,
    spawn: SpawnContext,
    tick: f64,
}

impl Population<Halvorsen> {
    /// Population driven by the default flow with the configured coefficient.
    pub fn new(config: &SimConfig) -> Self {
        Self::with_attractor(Halvorsen::new(config.coefficient), config)
    }
}

impl<A: Attractor> Population<A> {
    /// Population driven by an arbitrary attractor.
    ///
    /// Positions are drawn uniformly from the spawn cube and every particle
    /// gets a colour offset that it keeps for the rest of the run.
    pub fn with_attractor(attractor: A, config: &SimConfig) -> Self {
        let mut spawn = SpawnContext::new(config.seed);
        let count = config.particle_count as usize;

        let particles: Vec<Particle> = (0..count)
            .map(|_| Particle::new(spawn.random_in_cube(config.spawn_extent)))
            .collect();
        let profiles: Vec<ColorProfile> = (0..count)
            .map(|_| ColorProfile::new(spawn.random_offset(config.color_offset.clone())))
            .collect();

        Self {
            particles,
            profiles,
            integrator: Integrator::new(attractor, config.step_divisor),
            guard: config.guard(),
            spawn,
            tick: config.tick,
        }
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the population is empty.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn profiles(&self) -> &[ColorProfile] {
        &self.profiles
    }

    /// Mutable access to positions, e.g. to inject a state for inspection.
    /// Profiles stay untouched.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn integrator(&self) -> &Integrator<A> {
        &self.integrator
    }

    pub fn guard(&self) -> &DivergenceGuard {
        &self.guard
    }

    /// Advance every particle by one frame.
    pub fn step(&mut self) -> StepReport {
        let rng = self.spawn.rng();
        let mut reseeded = 0;
        for particle in &mut self.particles {
            let (next, divergence) = next_position(
                &self.integrator,
                &self.guard,
                particle.position,
                self.tick,
                rng,
            );
            particle.position = next;
            if divergence.is_some() {
                reseeded += 1;
            }
        }
        StepReport { reseeded }
    }

    /// Advance every particle by one frame on the rayon pool.
    ///
    /// Reseeds draw from per-thread generators, so a seeded run is not
    /// reproducible in this mode. Returns only once every update is done.
    #[cfg(feature = "parallel")]
    pub fn step_parallel(&mut self) -> StepReport {
        use rayon::prelude::*;

        let integrator = &self.integrator;
        let guard = &self.guard;
        let tick = self.tick;

        let reseeded = self
            .particles
            .par_iter_mut()
            .map_init(rand::thread_rng, |rng, particle| {
                let (next, divergence) =
                    next_position(integrator, guard, particle.position, tick, rng);
                particle.position = next;
                divergence.is_some()
            })
            .filter(|&fired| fired)
            .count();

        StepReport { reseeded }
    }

    /// Display colour of particle `index` at its current depth.
    pub fn color_of(&self, index: usize, base: Rgb, depth_scale: f64) -> Option<Rgb> {
        let particle = self.particles.get(index)?;
        let profile = self.profiles.get(index)?;
        Some(depth_color(base, profile, particle.depth(), depth_scale))
    }

    /// One disc per particle, in population order.
    pub fn discs<'a>(
        &'a self,
        projection: &'a Projection,
        base: Rgb,
        depth_scale: f64,
    ) -> impl Iterator<Item = Disc> + 'a {
        self.particles
            .iter()
            .zip(&self.profiles)
            .map(move |(particle, profile)| {
                let color = depth_color(base, profile, particle.depth(), depth_scale);
                projection.disc(particle.position, color)
            })
    }
}
