//! The engine handle: start, per-frame update, commands and stop.

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::config::EngineConfig;
use crate::controller::Command;
use crate::error::StartError;
use crate::integrator::Integrator;
use crate::morph::MorphState;
use crate::palette::Palette;
use crate::particle::{AmbientNode, Particle};
use crate::render::Renderer;
use crate::shapes::{Bounds, Shape};
use crate::store::ParticleStore;
use crate::surface::Surface;
use crate::time::{Clock, SystemClock};

/// A running particle engine bound to one surface.
///
/// The host calls [`frame`](Self::frame) once per display refresh and
/// forwards input as commands. Each call performs exactly one physics step
/// followed by one paint. Engines share no state, so several can run side by
/// side.
///
/// ```
/// use morphfield::{Bounds, Canvas, Color, Engine, EngineConfig};
///
/// let canvas = Canvas::new(320, 200, Color::BLACK);
/// let config = EngineConfig::default().with_particle_count(200).with_seed(1);
/// let mut engine = Engine::start(canvas, config).unwrap();
///
/// while engine.frame_count() < 3 {
///     engine.frame();
/// }
/// engine.next_shape();
/// engine.stop();
/// assert!(!engine.frame());
/// ```
pub struct Engine<S: Surface> {
    surface: S,
    config: EngineConfig,
    store: ParticleStore,
    integrator: Integrator,
    renderer: Renderer,
    morph: MorphState,
    clock: Box<dyn Clock>,
    shape: Shape,
    palette: Palette,
    frame_count: u64,
    running: bool,
}

impl<S: Surface> Engine<S> {
    /// Start an engine on `surface`.
    ///
    /// Randomness is seeded from `config.seed` when set, otherwise from
    /// system entropy. Deadlines use the system clock.
    pub fn start(surface: S, config: EngineConfig) -> Result<Self, StartError> {
        let rng: Box<dyn RngCore> = match config.seed {
            Some(seed) => Box::new(SmallRng::seed_from_u64(seed)),
            None => Box::new(SmallRng::from_entropy()),
        };
        Self::start_with(surface, config, rng, Box::new(SystemClock))
    }

    /// Start an engine with an explicit random source and clock.
    pub fn start_with(
        mut surface: S,
        config: EngineConfig,
        rng: Box<dyn RngCore>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, StartError> {
        if let Err(e) = config.validate() {
            log::warn!("Rejected engine start: {}", e);
            return Err(e.into());
        }

        let requested = config.bounds.unwrap_or_else(|| surface.bounds());
        if requested.is_degenerate() {
            return Err(zero_area(requested));
        }
        if !surface.acquire() {
            log::warn!("Drawing surface unavailable, not starting");
            return Err(StartError::SurfaceUnavailable);
        }

        // The surface may snap to whole pixels; its size is authoritative
        surface.resize(requested);
        let bounds = surface.bounds();
        if bounds.is_degenerate() {
            return Err(zero_area(bounds));
        }

        let store = ParticleStore::new(
            config.particle_count,
            config.ambient_node_count,
            bounds,
            config.initial_shape,
            config.initial_palette,
            rng,
        );

        log::info!(
            "Engine started: {} particles, {} ambient nodes, {}x{}",
            config.particle_count,
            config.ambient_node_count,
            bounds.width,
            bounds.height
        );

        Ok(Self {
            surface,
            integrator: Integrator::from_config(&config),
            renderer: Renderer::from_config(&config),
            morph: MorphState::Idle,
            clock,
            shape: config.initial_shape,
            palette: config.initial_palette,
            config,
            store,
            frame_count: 0,
            running: true,
        })
    }

    /// Advance one step and paint it.
    ///
    /// Returns `true` if the host should schedule another frame. After
    /// [`stop`](Self::stop) this does nothing and returns `false`.
    pub fn frame(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.integrator.step(&mut self.store);
        self.renderer.draw(&mut self.surface, &self.store);
        self.frame_count += 1;
        true
    }

    /// Stop the engine. Further frames and commands are ignored.
    ///
    /// Safe to call any number of times.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::info!("Engine stopped after {} frames", self.frame_count);
        }
    }

    /// Morph to the next shape in the cycle.
    ///
    /// Dropped while a morph is in flight; the shape does not advance.
    pub fn next_shape(&mut self) {
        let next = self.shape.next();
        self.retarget(next);
    }

    /// Morph to `shape`. Returns `false` if the command was dropped because
    /// a morph is in flight or the engine is stopped.
    pub fn retarget(&mut self, shape: Shape) -> bool {
        if !self.running {
            return false;
        }
        let now = self.clock.now();
        if !self.morph.try_begin(now, self.config.morph_duration()) {
            log::trace!("Morph to {} dropped, another is in flight", shape.name());
            return false;
        }
        log::debug!("Morphing {} -> {}", self.shape.name(), shape.name());
        self.shape = shape;
        self.store.retarget(shape);
        true
    }

    /// Switch the active palette and recolor every particle.
    pub fn set_palette(&mut self, palette: Palette) {
        if !self.running {
            return;
        }
        log::debug!("Palette -> {}", palette.name());
        self.palette = palette;
        self.store.recolor(palette);
    }

    /// Adopt new surface bounds.
    ///
    /// Reseeds the ambient network and lays the current shape out again
    /// immediately, regardless of any morph in flight. Bounds that leave the
    /// surface with zero area (a minimized window) or exceed
    /// [`Bounds::MAX_SIDE`] are ignored.
    pub fn on_resize(&mut self, bounds: Bounds) {
        if !self.running {
            return;
        }
        if bounds.is_degenerate() || bounds.is_oversized() {
            log::debug!("Ignoring resize to {}x{}", bounds.width, bounds.height);
            return;
        }
        let previous = self.store.bounds();
        self.surface.resize(bounds);
        let bounds = self.surface.bounds();
        if bounds.is_degenerate() {
            log::debug!("Ignoring zero-area resize ({}x{})", bounds.width, bounds.height);
            self.surface.resize(previous);
            return;
        }
        self.store.reseed_ambient(bounds);
        self.store.retarget(self.shape);
    }

    /// Execute a controller command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::NextShape => self.next_shape(),
            Command::SetPalette(palette) => self.set_palette(palette),
            Command::Resize(bounds) => self.on_resize(bounds),
        }
    }

    /// Whether a morph is currently throttling new retargets.
    pub fn is_morphing(&mut self) -> bool {
        let now = self.clock.now();
        self.morph.is_morphing(now)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[inline]
    pub fn palette(&self) -> Palette {
        self.palette
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.store.bounds()
    }

    /// Frames painted so far.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        self.store.particles()
    }

    #[inline]
    pub fn ambient_nodes(&self) -> &[AmbientNode] {
        self.store.nodes()
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

fn zero_area(bounds: Bounds) -> StartError {
    log::warn!("Surface has zero area ({}x{}), not starting", bounds.width, bounds.height);
    StartError::ZeroArea {
        width: bounds.width,
        height: bounds.height,
    }
}

impl<S: Surface> Drop for Engine<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
