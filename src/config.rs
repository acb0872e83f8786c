//! Engine configuration.
//!
//! Defaults give the intended look: 1500 particles, 80 ambient nodes, a
//! slow spring and a 2 s morph throttle. The spring and fade constants were
//! tuned by eye.
//!
//! # Builder Pattern
//! ```
//! use morphfield::{Bounds, EngineConfig, Palette};
//!
//! let config = EngineConfig::default()
//!     .with_particle_count(500)
//!     .with_ambient_node_count(40)
//!     .with_bounds(Bounds::new(800.0, 600.0))
//!     .with_palette(Palette::Fire)
//!     .with_seed(7);
//! assert!(config.validate().is_ok());
//! ```
//!
//! # JSON
//! Every field is optional in a config file:
//! ```json
//! { "particle_count": 800, "initial_palette": "neon", "background": "#050510" }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;
use crate::palette::{Color, Palette};
use crate::shapes::{Bounds, Shape};

/// Options recognized by [`Engine::start`](crate::Engine::start).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of shape-forming particles. Must be at least 1.
    pub particle_count: usize,
    /// Number of ambient network nodes. Zero disables the network.
    pub ambient_node_count: usize,
    /// Maximum distance at which two ambient nodes are connected.
    pub connection_radius: f32,
    /// Spring stiffness in (0, 1). Default: 0.02.
    pub spring_stiffness: f32,
    /// Damping in (0, 1); velocity is scaled by `1 - damping` each step. Default: 0.1.
    pub damping: f32,
    /// Explicit surface size. `None` uses the surface's current size.
    pub bounds: Option<Bounds>,
    /// How long a morph blocks further morphs, in milliseconds.
    pub morph_duration_ms: u64,
    /// Alpha of the per-frame background overlay that produces trails.
    pub trail_alpha: f32,
    /// Background color of the surface and the trail overlay.
    pub background: Color,
    /// Color of ambient connection lines.
    pub connection_color: Color,
    /// Opacity of a connection between two coincident nodes.
    pub connection_opacity: f32,
    /// Stroke width of connection lines in pixels.
    pub connection_width: f32,
    /// Color of ambient nodes.
    pub node_color: Color,
    /// Blur radius of the ambient node glow.
    pub node_glow_blur: f32,
    /// Blur radius of the particle glow.
    pub particle_glow_blur: f32,
    /// Shape the particles start on.
    pub initial_shape: Shape,
    /// Palette active at start.
    pub initial_palette: Palette,
    /// Seed for reproducible runs. `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            particle_count: 1500,
            ambient_node_count: 80,
            connection_radius: 120.0,
            spring_stiffness: 0.02,
            damping: 0.1,
            bounds: None,
            morph_duration_ms: 2000,
            trail_alpha: 0.05,
            background: Color::BLACK,
            connection_color: Color::CORNSILK,
            connection_opacity: 0.3,
            connection_width: 0.8,
            node_color: Color::CORNSILK,
            node_glow_blur: 8.0,
            particle_glow_blur: 10.0,
            initial_shape: Shape::Sphere,
            initial_palette: Palette::Rainbow,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check every option against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::NoParticles);
        }
        if !(self.spring_stiffness > 0.0 && self.spring_stiffness < 1.0) {
            return Err(ConfigError::InvalidStiffness(self.spring_stiffness));
        }
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(ConfigError::InvalidDamping(self.damping));
        }
        if !(self.connection_radius.is_finite() && self.connection_radius >= 0.0) {
            return Err(ConfigError::InvalidConnectionRadius(self.connection_radius));
        }
        for (option, value) in [
            ("trail_alpha", self.trail_alpha),
            ("connection_opacity", self.connection_opacity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidOpacity { option, value });
            }
        }
        if let Some(b) = self.bounds {
            let finite = b.width.is_finite() && b.height.is_finite();
            if !finite || b.width < 0.0 || b.height < 0.0 || b.is_oversized() {
                return Err(ConfigError::InvalidBounds {
                    width: b.width,
                    height: b.height,
                });
            }
        }
        Ok(())
    }

    /// The morph throttle window.
    pub fn morph_duration(&self) -> Duration {
        Duration::from_millis(self.morph_duration_ms)
    }

    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Set the number of ambient nodes.
    pub fn with_ambient_node_count(mut self, count: usize) -> Self {
        self.ambient_node_count = count;
        self
    }

    /// Set the connection radius of the ambient network.
    pub fn with_connection_radius(mut self, radius: f32) -> Self {
        self.connection_radius = radius;
        self
    }

    /// Set spring stiffness and damping together.
    pub fn with_spring(mut self, stiffness: f32, damping: f32) -> Self {
        self.spring_stiffness = stiffness;
        self.damping = damping;
        self
    }

    /// Size the surface explicitly at start.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Set the morph throttle window.
    pub fn with_morph_duration(mut self, duration: Duration) -> Self {
        self.morph_duration_ms = duration.as_millis() as u64;
        self
    }

    /// Set the trail overlay alpha.
    pub fn with_trail_alpha(mut self, alpha: f32) -> Self {
        self.trail_alpha = alpha;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Set the starting shape.
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.initial_shape = shape;
        self
    }

    /// Set the starting palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.initial_palette = palette;
        self
    }

    /// Seed the random source for reproducible output.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.morph_duration(), Duration::from_secs(2));
    }

    #[test]
    fn test_rejects_zero_particles() {
        let config = EngineConfig::default().with_particle_count(0);
        assert!(matches!(config.validate(), Err(ConfigError::NoParticles)));
    }

    #[test]
    fn test_rejects_out_of_range_spring() {
        for (k, d) in [(0.0, 0.1), (1.0, 0.1), (0.2, 0.0), (0.2, 1.0), (f32::NAN, 0.1)] {
            assert!(EngineConfig::default().with_spring(k, d).validate().is_err());
        }
        assert!(EngineConfig::default().with_spring(0.2, 0.1).validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_bounds_and_radius() {
        let config = EngineConfig::default().with_bounds(Bounds::new(-1.0, 10.0));
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBounds { .. })));
        let config = EngineConfig::default().with_connection_radius(-5.0);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidConnectionRadius(_))));
    }

    #[test]
    fn test_rejects_oversized_bounds() {
        let config = EngineConfig::default().with_bounds(Bounds::new(1e10, 1e10));
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBounds { .. })));
        let config = EngineConfig::default().with_bounds(Bounds::new(Bounds::MAX_SIDE + 1.0, 600.0));
        assert!(config.validate().is_err());
        let config = EngineConfig::default().with_bounds(Bounds::new(Bounds::MAX_SIDE, Bounds::MAX_SIDE));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EngineConfig::from_json_str(
            r##"{ "particle_count": 800, "initial_palette": "neon", "background": "#050510",
                 "bounds": { "width": 640, "height": 480 } }"##,
        )
        .unwrap();
        assert_eq!(config.particle_count, 800);
        assert_eq!(config.initial_palette, Palette::Neon);
        assert_eq!(config.background, Color::hex(0x050510));
        assert_eq!(config.bounds, Some(Bounds::new(640.0, 480.0)));
        assert_eq!(config.ambient_node_count, 80);
    }

    #[test]
    fn test_json_validation_errors_surface() {
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "particle_count": 0 }"#),
            Err(ConfigError::NoParticles)
        ));
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "background": "red" }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            EngineConfig::load("/nonexistent/morphfield.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
