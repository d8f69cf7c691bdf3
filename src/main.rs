use halvorsen::prelude::*;

/// Usage: `halvorsen [PARTICLE_COUNT] [halvorsen|lorenz|aizawa|thomas]`
fn main() -> Result<(), SimulationError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);

    let mut simulation = Simulation::new();
    if let Some(arg) = args.next() {
        match arg.parse() {
            Ok(count) => simulation = simulation.with_particle_count(count),
            Err(_) => log::warn!("Ignoring particle count {:?}: not a number", arg),
        }
    }

    match args.next().as_deref() {
        None | Some("halvorsen") => simulation.run(),
        Some("lorenz") => simulation
            .with_divergence_bound(60.0)
            .with_base_color(Rgb::new(240.0, 100.0, 100.0))
            .with_projection(15.0, DVec2::ZERO)
            .with_attractor(Lorenz::default())
            .run(),
        Some("aizawa") => simulation
            .with_divergence_bound(20.0)
            .with_base_color(Rgb::new(230.0, 220.0, 0.0))
            .with_projection(200.0, DVec2::ZERO)
            .with_attractor(Aizawa::default())
            .run(),
        Some("thomas") => simulation
            .with_divergence_bound(10.0)
            .with_base_color(Rgb::new(160.0, 80.0, 230.0))
            .with_projection(80.0, DVec2::ZERO)
            .with_attractor(Thomas::default())
            .run(),
        Some(other) => {
            log::warn!("Unknown flow {:?}, using halvorsen", other);
            simulation.run()
        }
    }
}
