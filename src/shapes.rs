//! Target shapes the particle field can morph into.
//!
//! Each shape is a pure function from `(index, total, bounds)` to a point on
//! the canvas. Particles are spread along the shape in index order, so
//! neighbouring indices land close to each other and a morph reads as one
//! continuous flow rather than a scatter.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Size of the drawing area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    /// Largest side a surface may have, the default wgpu 2D texture limit.
    pub const MAX_SIDE: f32 = 8192.0;

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either side exceeds [`MAX_SIDE`](Self::MAX_SIDE).
    pub fn is_oversized(&self) -> bool {
        self.width > Self::MAX_SIDE || self.height > Self::MAX_SIDE
    }

    /// True when either side is zero, negative or not finite.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Length of the shorter side.
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Whether `p` lies inside `[0, width] x [0, height]`.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

impl From<(u32, u32)> for Bounds {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width as f32, height as f32)
    }
}

/// The supported target shapes, in cycling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Fibonacci-style sphere projection.
    #[default]
    Sphere,
    /// Square outline.
    Cube,
    /// Horizontal sine wave across the full width.
    Wave,
    /// Four-turn Archimedean spiral.
    Spiral,
}

impl Shape {
    /// All shapes in cycling order.
    pub const ALL: [Shape; 4] = [Shape::Sphere, Shape::Cube, Shape::Wave, Shape::Spiral];

    /// Position of this shape in the cycle.
    pub fn index(&self) -> usize {
        match self {
            Shape::Sphere => 0,
            Shape::Cube => 1,
            Shape::Wave => 2,
            Shape::Spiral => 3,
        }
    }

    /// The next shape in the cycle, wrapping around.
    pub fn next(&self) -> Shape {
        Shape::ALL[(self.index() + 1) % Shape::ALL.len()]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Shape::Sphere => "sphere",
            Shape::Cube => "cube",
            Shape::Wave => "wave",
            Shape::Spiral => "spiral",
        }
    }

    /// Target point for particle `index` of `total` inside `bounds`.
    #[inline]
    pub fn point(&self, index: usize, total: usize, bounds: Bounds) -> Vec2 {
        point_for(*self, index, total, bounds)
    }
}

/// Target point for particle `index` of `total` on `shape`.
///
/// Pure: identical arguments always give identical points. A `total` of zero
/// is treated as one, and degenerate bounds map every index to the origin.
pub fn point_for(shape: Shape, index: usize, total: usize, bounds: Bounds) -> Vec2 {
    if bounds.is_degenerate() {
        return Vec2::ZERO;
    }
    let total = total.max(1) as f32;
    let index = index as f32;
    let center = bounds.center();
    let min_side = bounds.min_side();

    match shape {
        Shape::Sphere => {
            let phi = (1.0 - 2.0 * (index / total)).clamp(-1.0, 1.0).acos();
            let theta = (total * PI).sqrt() * phi;
            let radius = min_side * 0.15;
            center + radius * Vec2::new(phi.sin() * theta.cos(), phi.sin() * theta.sin())
        }
        Shape::Cube => {
            let size = min_side * 0.3;
            let half = size * 0.5;
            let quarter = total / 4.0;
            let side = (index / quarter).floor() as u32;
            let t = (index % quarter) / quarter;
            match side {
                0 => Vec2::new(center.x - half + t * size, center.y - half),
                1 => Vec2::new(center.x + half, center.y - half + t * size),
                2 => Vec2::new(center.x + half - t * size, center.y + half),
                _ => Vec2::new(center.x - half, center.y + half - t * size),
            }
        }
        Shape::Wave => {
            let x = (index / total) * bounds.width;
            let amplitude = min_side * 0.1;
            let y = center.y + ((x / bounds.width) * PI * 4.0).sin() * amplitude;
            Vec2::new(x, y)
        }
        Shape::Spiral => {
            let u = index / total;
            let angle = u * PI * 8.0;
            let radius = u * min_side * 0.2;
            center + radius * Vec2::new(angle.cos(), angle.sin())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds::new(800.0, 600.0);

    #[test]
    fn test_point_for_deterministic() {
        for shape in Shape::ALL {
            for total in [1, 2, 3, 7, 100, 1500] {
                for index in 0..total.min(50) {
                    let a = point_for(shape, index, total, BOUNDS);
                    let b = point_for(shape, index, total, BOUNDS);
                    assert_eq!(a, b);
                }
            }
        }
    }

    #[test]
    fn test_single_particle_is_finite() {
        for shape in Shape::ALL {
            let p = point_for(shape, 0, 1, BOUNDS);
            assert!(p.is_finite(), "{} gave {:?}", shape.name(), p);
            assert!(BOUNDS.contains(p));
        }
    }

    #[test]
    fn test_zero_total_treated_as_one() {
        for shape in Shape::ALL {
            assert_eq!(point_for(shape, 0, 0, BOUNDS), point_for(shape, 0, 1, BOUNDS));
        }
    }

    #[test]
    fn test_degenerate_bounds_yield_origin() {
        for shape in Shape::ALL {
            for bounds in [Bounds::new(0.0, 0.0), Bounds::new(0.0, 600.0), Bounds::new(800.0, 0.0)] {
                for index in 0..10 {
                    assert_eq!(point_for(shape, index, 10, bounds), Vec2::ZERO);
                }
            }
        }
    }

    #[test]
    fn test_all_shapes_fit_bounds() {
        for shape in Shape::ALL {
            for index in 0..1500 {
                let p = point_for(shape, index, 1500, BOUNDS);
                assert!(BOUNDS.contains(p), "{} index {} out of bounds: {:?}", shape.name(), index, p);
            }
        }
    }

    #[test]
    fn test_cube_outline_is_continuous() {
        let total = 400;
        let size = BOUNDS.min_side() * 0.3;
        let step = size / (total as f32 / 4.0);
        for index in 1..total {
            let a = point_for(Shape::Cube, index - 1, total, BOUNDS);
            let b = point_for(Shape::Cube, index, total, BOUNDS);
            assert!(a.distance(b) <= step + 1e-3, "jump at {}: {}", index, a.distance(b));
        }
    }

    #[test]
    fn test_spiral_and_wave_are_continuous() {
        let total = 1000;
        let r_max = BOUNDS.min_side() * 0.2;
        let spiral_bound = (r_max * PI * 8.0 + r_max) / total as f32;
        let amplitude = BOUNDS.min_side() * 0.1;
        let wave_bound = (BOUNDS.width + amplitude * PI * 4.0) / total as f32;

        for index in 1..total {
            let a = point_for(Shape::Spiral, index - 1, total, BOUNDS);
            let b = point_for(Shape::Spiral, index, total, BOUNDS);
            assert!(a.distance(b) <= spiral_bound + 1e-3);

            let a = point_for(Shape::Wave, index - 1, total, BOUNDS);
            let b = point_for(Shape::Wave, index, total, BOUNDS);
            assert!(a.distance(b) <= wave_bound + 1e-3);
        }
    }

    #[test]
    fn test_shape_cycle_wraps() {
        assert_eq!(Shape::Sphere.next(), Shape::Cube);
        assert_eq!(Shape::Spiral.next(), Shape::Sphere);
        let mut shape = Shape::default();
        for _ in 0..Shape::ALL.len() {
            shape = shape.next();
        }
        assert_eq!(shape, Shape::default());
    }
}
