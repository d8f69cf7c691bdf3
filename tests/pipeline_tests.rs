//! Integration tests for the per-frame particle pipeline.
//!
//! These exercise the public API end to end: population creation, the
//! guard-then-integrate update, depth colouring and projection.

use halvorsen::prelude::*;
use halvorsen::{
    depth_color, next_position, ColorProfile, DivergenceGuard, Integrator, Population, Projection,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded(count: u32, seed: u64) -> SimConfig {
    SimConfig {
        particle_count: count,
        seed: Some(seed),
        ..Default::default()
    }
}

// ============================================================================
// Numerical stability
// ============================================================================

#[test]
fn test_states_stay_finite_over_many_frames() {
    let mut population = Population::new(&seeded(500, 11));

    for frame in 0..2_000 {
        population.step();
        for (i, particle) in population.particles().iter().enumerate() {
            assert!(
                particle.position.is_finite(),
                "particle {} went non-finite at frame {}: {:?}",
                i,
                frame,
                particle.position
            );
        }
    }
}

#[test]
fn test_one_step_past_the_bound_is_limited() {
    // From anywhere inside the bound a single Euler step moves at most
    // dt * (1.89*100 + 4*100 + 4*100 + 100^2) ~= 35.2 per axis.
    let mut population = Population::new(&seeded(300, 12));

    for _ in 0..1_000 {
        population.step();
        for particle in population.particles() {
            assert!(particle.position.abs().max_element() < 136.0);
        }
    }
}

// ============================================================================
// Divergence guard
// ============================================================================

#[test]
fn test_guard_substitutes_bounded_state_before_integrating() {
    let integrator = Integrator::default();
    let guard = DivergenceGuard::default();
    let mut rng = StdRng::seed_from_u64(13);

    for escaped in [
        DVec3::new(100.01, 0.0, 0.0),
        DVec3::new(0.0, -1e12, 0.0),
        DVec3::new(5.0, 5.0, 250.0),
    ] {
        let mut replay = rng.clone();
        let (next, divergence) = next_position(&integrator, &guard, escaped, 16.0, &mut rng);
        assert!(divergence.is_some());

        // The replacement is drawn first, then advanced in the same call.
        let replacement = guard.resample(&mut replay);
        assert!(replacement.abs().max_element() <= 3.0);
        assert_eq!(next, integrator.advance(replacement, 16.0));
    }
}

#[test]
fn test_guard_does_not_fire_within_bound() {
    let integrator = Integrator::default();
    let guard = DivergenceGuard::default();
    let mut rng = StdRng::seed_from_u64(14);

    for inside in [
        DVec3::new(100.0, -100.0, 100.0),
        DVec3::new(-99.5, 0.0, 42.0),
        DVec3::ZERO,
    ] {
        let (next, divergence) = next_position(&integrator, &guard, inside, 16.0, &mut rng);
        assert!(divergence.is_none());
        assert_eq!(next, integrator.advance(inside, 16.0));
    }
}

#[test]
fn test_profiles_stable_across_frames_and_reseeds() {
    let mut population = Population::new(&seeded(200, 15));
    let profiles = population.profiles().to_vec();

    let mut total_reseeds = 0;
    for frame in 0..300 {
        if frame % 50 == 0 {
            for particle in population.particles_mut().iter_mut().step_by(3) {
                particle.position = DVec3::new(0.0, 500.0, 0.0);
            }
        }
        total_reseeds += population.step().reseeded;
        assert_eq!(population.profiles(), &profiles[..]);
    }
    assert!(total_reseeds >= 6 * 67);
}

// ============================================================================
// Colour and projection
// ============================================================================

#[test]
fn test_reference_depth_color() {
    let color = depth_color(
        Rgb::new(150.0, 100.0, 150.0),
        &ColorProfile::new([0, 0, 0]),
        2.0,
        5.0,
    );
    assert_eq!(color, Rgb::new(160.0, 110.0, 160.0));
}

#[test]
fn test_reference_projection() {
    let projection = Projection::new(1920, 1080);
    assert_eq!(
        projection.project(DVec3::new(0.0, 0.0, -1.0)),
        DVec2::new(1060.0, 640.0)
    );
}

#[test]
fn test_discs_use_current_depth() {
    let config = seeded(64, 16);
    let mut population = Population::new(&config);
    let projection = config.projection();

    for _ in 0..10 {
        population.step();
    }

    let discs: Vec<_> = population
        .discs(&projection, config.base_color, config.depth_scale)
        .collect();
    for ((disc, particle), profile) in discs
        .iter()
        .zip(population.particles())
        .zip(population.profiles())
    {
        let expected = depth_color(config.base_color, profile, particle.position.z, 5.0);
        assert_eq!(disc.color, expected);
        assert_eq!(disc.diameter, 10.0);
    }
}

// ============================================================================
// Builder
// ============================================================================

#[test]
fn test_builder_population_is_reproducible() {
    let simulation = Simulation::new().with_particle_count(128).with_seed(17);
    let mut a = simulation.build_population().expect("valid config");
    let mut b = simulation.build_population().expect("valid config");

    for _ in 0..50 {
        a.step();
        b.step();
    }
    assert_eq!(a.particles(), b.particles());
}

#[test]
fn test_builder_rejects_invalid_config() {
    let simulation = Simulation::new().with_particle_count(0);
    assert!(matches!(
        simulation.build_population(),
        Err(SimulationError::InvalidConfig(_))
    ));
}

#[test]
fn test_builder_with_custom_attractor() {
    /// Linear decay towards the origin.
    #[derive(Clone)]
    struct Decay;

    impl Attractor for Decay {
        fn derivative(&self, p: DVec3) -> DVec3 {
            -p
        }
    }

    let simulation = Simulation::new()
        .with_particle_count(32)
        .with_seed(18)
        .with_attractor(Decay);
    let mut population = simulation.build_population().expect("valid config");
    let before: Vec<f64> = population
        .particles()
        .iter()
        .map(|p| p.position.length())
        .collect();

    for _ in 0..100 {
        assert_eq!(population.step().reseeded, 0);
    }
    for (particle, start) in population.particles().iter().zip(before) {
        assert!(particle.position.length() <= start);
    }
}

#[test]
fn test_builtin_flows_run_through_pipeline() {
    fn run<A: Attractor + Clone + 'static>(flow: A, bound: f64) -> usize {
        let simulation = Simulation::new()
            .with_particle_count(200)
            .with_seed(20)
            .with_divergence_bound(bound)
            .with_attractor(flow);
        let mut population = simulation.build_population().expect("valid config");

        let mut reseeded = 0;
        for _ in 0..500 {
            reseeded += population.step().reseeded;
            for particle in population.particles() {
                assert!(particle.position.is_finite());
            }
        }
        assert_eq!(population.len(), 200);
        reseeded
    }

    assert_eq!(run(Thomas::default(), 10.0), 0);
    assert_eq!(run(Lorenz::default(), 100.0), 0);
    run(Aizawa::default(), 20.0);
}

#[test]
fn test_coefficient_reaches_integrator() {
    let simulation = Simulation::new().with_coefficient(0.5).with_seed(19);
    let population = simulation.build_population().expect("valid config");
    assert_eq!(population.integrator().attractor().a, 0.5);
    assert_eq!(simulation.config().coefficient, 0.5);
}
