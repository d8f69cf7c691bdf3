//! Simulation builder and runner

use std::sync::Arc;
use std::time::Instant;

use glam::DVec2;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::attractor::{Attractor, Halvorsen};
use crate::color::Rgb;
use crate::config::SimConfig;
use crate::error::SimulationError;
use crate::gpu::{GpuState, RenderSettings};
use crate::input::Input;
use crate::population::Population;
use crate::projection::Projection;
use crate::shader::DiscInstance;
use crate::time::FramePacer;

/// An attractor animation builder.
///
/// Use method chaining to configure, then call `.run()` to start.
pub struct Simulation<A: Attractor = Halvorsen> {
    config: SimConfig,
    attractor: A,
}

impl Simulation<Halvorsen> {
    /// Create a new simulation with the reference configuration.
    pub fn new() -> Self {
        let config = SimConfig::default();
        Self {
            attractor: Halvorsen::new(config.coefficient),
            config,
        }
    }

    /// Set the coefficient `a` of the default flow.
    pub fn with_coefficient(mut self, a: f64) -> Self {
        self.config.coefficient = a;
        self.attractor = Halvorsen::new(a);
        self
    }

    /// Replace the whole configuration, including the flow coefficient.
    pub fn with_config(mut self, config: SimConfig) -> Self {
        self.attractor = Halvorsen::new(config.coefficient);
        self.config = config;
        self
    }
}

impl Default for Simulation<Halvorsen> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Attractor + 'static> Simulation<A> {
    /// Drive particles with a different vector field.
    ///
    /// The configured coefficient only applies to the default flow and is
    /// ignored from here on.
    pub fn with_attractor<B: Attractor>(self, attractor: B) -> Simulation<B> {
        Simulation {
            config: self.config,
            attractor,
        }
    }

    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.config.particle_count = count;
        self
    }

    /// Set the nominal frame duration fed to the integrator.
    pub fn with_tick(mut self, tick: f64) -> Self {
        self.config.tick = tick;
        self
    }

    /// Set the per-axis magnitude that triggers a reseed.
    pub fn with_divergence_bound(mut self, bound: f64) -> Self {
        self.config.divergence_bound = bound;
        self
    }

    /// Set the shared base colour (0-255 scale).
    pub fn with_base_color(mut self, color: Rgb) -> Self {
        self.config.base_color = color;
        self
    }

    /// Set the colour shift per unit of depth.
    pub fn with_depth_scale(mut self, scale: f64) -> Self {
        self.config.depth_scale = scale;
        self
    }

    /// Set the window size in pixels.
    pub fn with_screen_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Set projection scale and post-centring pixel offset.
    pub fn with_projection(mut self, scale: f64, offset: DVec2) -> Self {
        self.config.projection_scale = scale;
        self.config.projection_offset = offset;
        self
    }

    /// Set the frame-rate cap.
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.config.target_fps = fps;
        self
    }

    /// Seed the random source for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// The configuration the run will use.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Build the population this run would start from, without opening a window.
    pub fn build_population(&self) -> Result<Population<A>, SimulationError>
    where
        A: Clone,
    {
        self.config.validate()?;
        Ok(Population::with_attractor(self.attractor.clone(), &self.config))
    }

    /// Run the simulation. This blocks until the window is closed.
    pub fn run(self) -> Result<(), SimulationError> {
        self.config.validate()?;
        let population = Population::with_attractor(self.attractor, &self.config);
        launch(population, self.config)
    }
}

fn launch<A: Attractor + 'static>(
    population: Population<A>,
    config: SimConfig,
) -> Result<(), SimulationError> {
    log::info!(
        "Starting: {} particles, {} flow, tick = {}, {}x{} @ {} fps",
        config.particle_count,
        population.integrator().attractor().name(),
        config.tick,
        config.width,
        config.height,
        config.target_fps
    );
    log::debug!("Configuration: {:?}", config);

    let event_loop = EventLoop::new()?;
    let mut app = App::new(population, config);
    event_loop.run_app(&mut app)?;

    log::info!("Stopped after {} frames", app.pacer.frame());
    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App<A: Attractor> {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    population: Population<A>,
    projection: Projection,
    instances: Vec<DiscInstance>,
    pacer: FramePacer,
    input: Input,
    config: SimConfig,
    reseeded_since_report: usize,
    error: Option<SimulationError>,
}

impl<A: Attractor> App<A> {
    fn new(population: Population<A>, config: SimConfig) -> Self {
        Self {
            window: None,
            gpu_state: None,
            instances: Vec::with_capacity(population.len()),
            population,
            projection: config.projection(),
            pacer: FramePacer::new(config.target_fps),
            input: Input::new(),
            config,
            reseeded_since_report: 0,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), SimulationError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.width,
                self.config.height,
            ))
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        self.window = Some(window.clone());

        let settings = RenderSettings {
            screen_width: self.config.width,
            screen_height: self.config.height,
            capacity: self.config.particle_count,
            background: self.config.background,
        };
        self.gpu_state = Some(pollster::block_on(GpuState::new(window, settings))?);
        Ok(())
    }

    fn update(&mut self) {
        #[cfg(feature = "parallel")]
        let report = self.population.step_parallel();
        #[cfg(not(feature = "parallel"))]
        let report = self.population.step();

        if report.reseeded > 0 {
            log::trace!("Reseeded {} diverged particles", report.reseeded);
        }
        self.reseeded_since_report += report.reseeded;

        self.instances.clear();
        self.instances.extend(
            self.population
                .discs(&self.projection, self.config.base_color, self.config.depth_scale)
                .map(DiscInstance::from),
        );
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if self.pacer.begin_frame(now) {
            log::debug!(
                "{:.1} fps, {} reseeds since last report",
                self.pacer.fps(),
                self.reseeded_since_report
            );
            self.reseeded_since_report = 0;
        }

        self.update();

        if let Some(gpu_state) = &mut self.gpu_state {
            match gpu_state.render(&self.instances) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    gpu_state.reconfigure()
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Surface out of memory, exiting");
                    event_loop.exit();
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }
}

impl<A: Attractor> ApplicationHandler for App<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                log::error!("Initialization failed: {}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);
        if self.input.quit_requested() {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.pacer.redraw_delivered();
                if self.pacer.is_due(Instant::now()) {
                    self.frame(event_loop);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        };

        let now = Instant::now();
        if self.pacer.poll(now) {
            window.request_redraw();
        }
        // A withheld redraw (minimised, occluded) parks the loop until the
        // next event rather than re-arming a deadline that already passed.
        let control_flow = match self.pacer.wake_time(now) {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        };
        event_loop.set_control_flow(control_flow);
    }
}
