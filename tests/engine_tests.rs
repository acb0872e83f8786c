//! Integration tests for the engine lifecycle.
//!
//! These drive a full [`Engine`] against a recording surface, so every draw
//! call of the most recent frame can be inspected.

use std::time::Duration;

use morphfield::prelude::*;
use morphfield::{point_for, ConfigError, StartError};
use rand::rngs::SmallRng;
use rand::SeedableRng;

// ============================================================================
// Recording surface
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Call {
    Fade,
    Fill { center: Vec2, radius: f32 },
    Glow { center: Vec2, radius: f32 },
    Line { alpha: f32 },
}

/// Keeps the draw calls of the last frame. A fade starts a new frame.
struct Recorder {
    bounds: Bounds,
    available: bool,
    calls: Vec<Call>,
    frames: usize,
}

impl Recorder {
    fn new(width: f32, height: f32) -> Self {
        Self {
            bounds: Bounds::new(width, height),
            available: true,
            calls: Vec::new(),
            frames: 0,
        }
    }

    fn unavailable(width: f32, height: f32) -> Self {
        Self {
            available: false,
            ..Self::new(width, height)
        }
    }
}

impl Surface for Recorder {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    fn acquire(&mut self) -> bool {
        self.available
    }

    fn fade(&mut self, _color: Color, _alpha: f32) {
        self.calls.clear();
        self.frames += 1;
        self.calls.push(Call::Fade);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, _color: Color, _alpha: f32) {
        self.calls.push(Call::Fill { center, radius });
    }

    fn glow_circle(&mut self, center: Vec2, radius: f32, _blur: f32, _color: Color, _alpha: f32) {
        self.calls.push(Call::Glow { center, radius });
    }

    fn stroke_line(&mut self, _from: Vec2, _to: Vec2, _width: f32, _color: Color, alpha: f32) {
        self.calls.push(Call::Line { alpha });
    }
}

fn small_config() -> EngineConfig {
    EngineConfig::default()
        .with_particle_count(100)
        .with_ambient_node_count(10)
        .with_seed(42)
}

fn engine_with_clock(clock: &ManualClock) -> Engine<Recorder> {
    Engine::start_with(
        Recorder::new(800.0, 600.0),
        small_config(),
        Box::new(SmallRng::seed_from_u64(42)),
        Box::new(clock.clone()),
    )
    .unwrap()
}

// ============================================================================
// Start
// ============================================================================

#[test]
fn test_start_and_first_frame() {
    let mut engine = Engine::start(Recorder::new(800.0, 600.0), small_config()).unwrap();
    assert!(engine.is_running());
    assert_eq!(engine.particles().len(), 100);
    assert_eq!(engine.ambient_nodes().len(), 10);

    assert!(engine.frame());
    assert_eq!(engine.frame_count(), 1);

    let bounds = engine.bounds();
    for p in engine.particles() {
        assert!(bounds.contains(p.position()), "particle escaped: {:?}", p.position());
    }
    for n in engine.ambient_nodes() {
        assert!(bounds.contains(n.position()), "node escaped: {:?}", n.position());
    }
}

#[test]
fn test_start_rejects_zero_particles() {
    let config = small_config().with_particle_count(0);
    let result = Engine::start(Recorder::new(800.0, 600.0), config);
    assert!(matches!(result, Err(StartError::Config(ConfigError::NoParticles))));
}

#[test]
fn test_start_rejects_zero_area() {
    let result = Engine::start(Recorder::new(0.0, 0.0), small_config());
    assert!(matches!(result, Err(StartError::ZeroArea { .. })));
}

#[test]
fn test_start_rejects_zero_area_canvas() {
    let result = Engine::start(Canvas::new(0, 0, Color::BLACK), small_config());
    assert!(matches!(result, Err(StartError::ZeroArea { .. })));
}

#[test]
fn test_start_rejects_unavailable_surface() {
    let result = Engine::start(Recorder::unavailable(800.0, 600.0), small_config());
    assert!(matches!(result, Err(StartError::SurfaceUnavailable)));
}

#[test]
fn test_config_bounds_override_surface() {
    let config = small_config().with_bounds(Bounds::new(320.0, 240.0));
    let engine = Engine::start(Recorder::new(800.0, 600.0), config).unwrap();
    assert_eq!(engine.bounds(), Bounds::new(320.0, 240.0));
    assert_eq!(engine.surface().bounds(), Bounds::new(320.0, 240.0));
}

#[test]
fn test_seeded_engines_match() {
    let mut a = Engine::start(Recorder::new(800.0, 600.0), small_config()).unwrap();
    let mut b = Engine::start(Recorder::new(800.0, 600.0), small_config()).unwrap();
    for _ in 0..30 {
        a.frame();
        b.frame();
    }

    for (pa, pb) in a.particles().iter().zip(b.particles()) {
        assert_eq!(pa.position(), pb.position());
        assert_eq!(pa.color(), pb.color());
        assert_eq!(pa.size(), pb.size());
    }
    for (na, nb) in a.ambient_nodes().iter().zip(b.ambient_nodes()) {
        assert_eq!(na.position(), nb.position());
    }
}

// ============================================================================
// Morphing
// ============================================================================

#[test]
fn test_rapid_next_shape_advances_once() {
    let clock = ManualClock::new();
    let mut engine = engine_with_clock(&clock);
    assert_eq!(engine.shape(), Shape::Sphere);

    for _ in 0..4 {
        engine.next_shape();
        clock.advance(Duration::from_millis(100));
    }
    assert_eq!(engine.shape(), Shape::Cube);

    // Only the first call's targets took effect
    let bounds = engine.bounds();
    let total = engine.particles().len();
    for (i, p) in engine.particles().iter().enumerate() {
        assert_eq!(p.target(), point_for(Shape::Cube, i, total, bounds));
    }
}

#[test]
fn test_next_shape_after_window_advances_again() {
    let clock = ManualClock::new();
    let mut engine = engine_with_clock(&clock);

    engine.next_shape();
    clock.advance(Duration::from_millis(2000));
    engine.next_shape();
    assert_eq!(engine.shape(), Shape::Wave);
}

#[test]
fn test_shape_cycle_wraps_to_sphere() {
    let clock = ManualClock::new();
    let mut engine = engine_with_clock(&clock);
    for _ in 0..4 {
        engine.next_shape();
        clock.advance(Duration::from_millis(2000));
    }
    assert_eq!(engine.shape(), Shape::Sphere);
}

#[test]
fn test_particles_converge_on_new_shape() {
    let clock = ManualClock::new();
    let mut engine = engine_with_clock(&clock);
    assert!(engine.retarget(Shape::Wave));

    for _ in 0..1000 {
        engine.frame();
    }
    for p in engine.particles() {
        assert!(
            p.position().distance(p.target()) < 1.0,
            "particle still {} px from target",
            p.position().distance(p.target())
        );
    }
}

#[test]
fn test_palette_command_recolors() {
    let clock = ManualClock::new();
    let mut engine = engine_with_clock(&clock);
    engine.apply(Command::SetPalette(Palette::Fire));

    assert_eq!(engine.palette(), Palette::Fire);
    for p in engine.particles() {
        assert!(Palette::Fire.colors().contains(&p.color()));
    }
}

#[test]
fn test_palette_switch_ignores_throttle() {
    let clock = ManualClock::new();
    let mut engine = engine_with_clock(&clock);
    engine.next_shape();
    engine.apply(Command::SetPalette(Palette::Nature));
    assert_eq!(engine.palette(), Palette::Nature);
}

#[test]
fn test_resize_command_reseeds_network() {
    let clock = ManualClock::new();
    let mut engine = engine_with_clock(&clock);
    let small = Bounds::new(200.0, 100.0);
    engine.apply(Command::Resize(small));

    assert_eq!(engine.bounds(), small);
    assert_eq!(engine.ambient_nodes().len(), 10);
    for n in engine.ambient_nodes() {
        assert!(small.contains(n.position()));
    }
    for (i, p) in engine.particles().iter().enumerate() {
        assert_eq!(p.target(), point_for(Shape::Sphere, i, 100, small));
    }
}

// ============================================================================
// Stop
// ============================================================================

#[test]
fn test_stop_is_idempotent() {
    let mut engine = Engine::start(Recorder::new(800.0, 600.0), small_config()).unwrap();
    engine.frame();
    engine.stop();
    engine.stop();

    assert!(!engine.is_running());
    assert!(!engine.frame());
    assert_eq!(engine.frame_count(), 1);
    assert_eq!(engine.surface().frames, 1);
}

#[test]
fn test_stopped_engine_ignores_retarget() {
    let clock = ManualClock::new();
    let mut engine = engine_with_clock(&clock);
    engine.stop();
    assert!(!engine.retarget(Shape::Spiral));
    assert_eq!(engine.shape(), Shape::Sphere);
}

// ============================================================================
// Paint order
// ============================================================================

#[test]
fn test_frame_paint_order() {
    let mut engine = Engine::start(Recorder::new(800.0, 600.0), small_config()).unwrap();
    engine.frame();

    let calls = &engine.surface().calls;
    assert_eq!(calls.first(), Some(&Call::Fade));

    // Two calls per node then two per particle close out the frame
    let particle_calls = 2 * engine.particles().len();
    let node_calls = 2 * engine.ambient_nodes().len();
    assert!(calls.len() >= 1 + node_calls + particle_calls);

    let tail = &calls[calls.len() - particle_calls..];
    for (chunk, p) in tail.chunks(2).zip(engine.particles()) {
        assert_eq!(
            chunk[0],
            Call::Fill {
                center: p.position(),
                radius: p.size()
            }
        );
        assert_eq!(
            chunk[1],
            Call::Glow {
                center: p.position(),
                radius: p.size() * 0.5
            }
        );
    }

    // Every connection line precedes every node disc
    let network = &calls[1..calls.len() - particle_calls];
    let lines = network.iter().filter(|c| matches!(c, Call::Line { .. })).count();
    assert_eq!(network.len(), lines + node_calls);
    assert!(network[..lines].iter().all(|c| matches!(c, Call::Line { .. })));
    for c in network {
        if let Call::Line { alpha } = c {
            assert!(*alpha > 0.0 && *alpha <= 0.3);
        }
    }
}
