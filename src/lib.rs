//! # morphfield - shape-morphing particle engine
//!
//! A field of glowing particles that springs between target shapes, drawn
//! over a drifting "neural network" of faintly connected nodes.
//!
//! The engine is a plain owned handle. The host drives it with one
//! [`Engine::frame`] call per display refresh and forwards input as
//! commands; all drawing goes through the [`Surface`] trait, so the same
//! engine paints into the software [`Canvas`], a test double or anything
//! else that can draw discs and lines.
//!
//! ## Quick Start
//!
//! ```ignore
//! use morphfield::prelude::*;
//!
//! fn main() {
//!     let config = EngineConfig::default()
//!         .with_particle_count(1500)
//!         .with_palette(Palette::Neon);
//!     morphfield::host::run(config).unwrap();
//! }
//! ```
//!
//! ## Headless
//!
//! ```ignore
//! let canvas = Canvas::new(800, 600, Color::BLACK);
//! let mut engine = Engine::start(canvas, EngineConfig::default().with_seed(1))?;
//! for _ in 0..120 {
//!     engine.frame();
//! }
//! engine.next_shape();
//! engine.surface().save_png("frame.png")?;
//! ```
//!
//! ## Core Concepts
//!
//! | Piece | Role |
//! |-------|------|
//! | [`Shape`] / [`point_for`] | Pure target geometry for each particle index |
//! | [`ParticleStore`] | Particle and ambient-node state; retarget, recolor, reseed |
//! | [`Integrator`] | One fixed step: spring toward target, drift and reflect |
//! | [`MorphState`] | Drops new morphs until the current one's window passes |
//! | [`Renderer`] | Trail overlay, ambient network, particles with glow |
//! | [`Controller`] | Window input to [`Command`]s |

pub mod config;
pub mod controller;
mod engine;
pub mod error;
mod gpu;
pub mod host;
pub mod input;
pub mod integrator;
pub mod morph;
pub mod palette;
pub mod particle;
pub mod render;
pub mod shapes;
pub mod store;
pub mod surface;
pub mod time;

pub use config::EngineConfig;
pub use controller::{Command, Controller};
pub use engine::Engine;
pub use error::{ConfigError, ExportError, GpuError, HostError, StartError};
pub use glam::Vec2;
pub use integrator::Integrator;
pub use morph::MorphState;
pub use palette::{Color, Palette};
pub use particle::{AmbientNode, Particle};
pub use render::Renderer;
pub use shapes::{point_for, Bounds, Shape};
pub use store::ParticleStore;
pub use surface::{Canvas, Surface};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use morphfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::controller::Command;
    pub use crate::engine::Engine;
    pub use crate::palette::{Color, Palette};
    pub use crate::shapes::{Bounds, Shape};
    pub use crate::surface::{Canvas, Surface};
    pub use crate::time::{Clock, ManualClock};
    pub use crate::Vec2;
}
