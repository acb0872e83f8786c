//! Particle and ambient-node records.

use glam::Vec2;
use rand::{Rng, RngCore};

use crate::palette::{Color, Palette};
use crate::shapes::Bounds;

/// A shape-forming particle.
///
/// Velocity is private: it only changes through [`Particle::spring_step`].
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    position: Vec2,
    target: Vec2,
    velocity: Vec2,
    size: f32,
    color: Color,
    opacity: f32,
}

impl Particle {
    /// A particle resting on `target` with random size and opacity.
    pub(crate) fn spawn(target: Vec2, palette: Palette, rng: &mut dyn RngCore) -> Self {
        Self {
            position: target,
            target,
            velocity: Vec2::ZERO,
            size: rng.gen_range(1.0..3.0),
            color: palette.pick(rng),
            opacity: rng.gen_range(0.8..1.0),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub(crate) fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// One semi-implicit Euler step toward the target.
    ///
    /// The spring term is added before damping so the particle eases in
    /// without a velocity discontinuity at the target.
    #[inline]
    pub fn spring_step(&mut self, stiffness: f32, damping_factor: f32) {
        let delta = self.target - self.position;
        self.velocity += delta * stiffness;
        self.velocity *= damping_factor;
        self.position += self.velocity;
    }
}

/// A free-floating node of the decorative background network.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbientNode {
    position: Vec2,
    velocity: Vec2,
    size: f32,
    opacity: f32,
}

impl AmbientNode {
    /// Maximum absolute speed per axis, in pixels per frame.
    pub const MAX_SPEED: f32 = 0.25;

    /// A node at a random position inside `bounds` with a slow random drift.
    pub(crate) fn random(bounds: Bounds, rng: &mut dyn RngCore) -> Self {
        // gen::<f32>() keeps zero-sized bounds from producing an empty range
        let position = Vec2::new(
            rng.gen::<f32>() * bounds.width.max(0.0),
            rng.gen::<f32>() * bounds.height.max(0.0),
        );
        let velocity = Vec2::new(
            rng.gen_range(-Self::MAX_SPEED..Self::MAX_SPEED),
            rng.gen_range(-Self::MAX_SPEED..Self::MAX_SPEED),
        );
        Self {
            position,
            velocity,
            size: rng.gen_range(1.0..3.0),
            opacity: rng.gen_range(0.3..0.8),
        }
    }

    /// Build a node from explicit state.
    pub fn new(position: Vec2, velocity: Vec2, size: f32, opacity: f32) -> Self {
        Self {
            position,
            velocity,
            size,
            opacity,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Move by one step, reflecting off the edges of `bounds`.
    ///
    /// Reflection is lossless; the position is clamped back inside afterwards
    /// so overshoot never accumulates.
    #[inline]
    pub fn drift(&mut self, bounds: Bounds) {
        let width = bounds.width.max(0.0);
        let height = bounds.height.max(0.0);

        self.position += self.velocity;

        if self.position.x < 0.0 || self.position.x > width {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < 0.0 || self.position.y > height {
            self.velocity.y = -self.velocity.y;
        }

        self.position.x = self.position.x.clamp(0.0, width);
        self.position.y = self.position.y.clamp(0.0, height);
    }
}
