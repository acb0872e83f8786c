//! Raster surfaces the renderer paints onto.
//!
//! [`Surface`] is the drawing API the renderer needs: a fading overlay, soft
//! discs and thin lines, all blended source-over. [`Canvas`] implements it in
//! software on an RGBA8 pixel buffer that the windowed host uploads to the
//! GPU each frame, or that can be written out as a PNG.

use glam::Vec2;
use std::path::Path;

use crate::error::ExportError;
use crate::palette::Color;
use crate::shapes::Bounds;

/// A 2D raster target.
///
/// All `alpha` arguments are in `[0, 1]` and are clamped by implementations.
pub trait Surface {
    /// Current size of the surface's on-screen box.
    fn bounds(&self) -> Bounds;

    /// Resize the backing store to `bounds`.
    fn resize(&mut self, bounds: Bounds);

    /// Acquire the drawing context. Returns `false` if none is available.
    fn acquire(&mut self) -> bool {
        true
    }

    /// Blend `color` over the whole surface.
    fn fade(&mut self, color: Color, alpha: f32);

    /// Filled anti-aliased disc.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32);

    /// Filled disc whose edge falls off over `blur` pixels.
    fn glow_circle(&mut self, center: Vec2, radius: f32, blur: f32, color: Color, alpha: f32);

    /// Straight line segment of the given stroke width.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color, alpha: f32);
}

/// Software RGBA8 surface.
#[derive(Clone, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    background: Color,
    pixels: Vec<[u8; 4]>,
}

impl Canvas {
    /// Create a canvas filled with opaque `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let mut canvas = Self {
            width,
            height,
            background,
            pixels: Vec::new(),
        };
        canvas.reallocate();
        canvas
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major, ready for a texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Color of one pixel, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Write the current frame as a PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let image = image::RgbaImage::from_raw(self.width, self.height, self.as_bytes().to_vec())
            .ok_or(ExportError::BufferSize)?;
        image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    fn reallocate(&mut self) {
        let len = self.width as usize * self.height as usize;
        let bg = self.background;
        self.pixels = vec![[bg.r, bg.g, bg.b, 255]; len];
    }

    /// Source-over blend of `color` at `alpha` into pixel `(x, y)`.
    #[inline]
    fn blend(&mut self, x: i64, y: i64, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 || alpha <= 0.0 {
            return;
        }
        let a = alpha.min(1.0);
        let px = &mut self.pixels[(y as usize) * self.width as usize + x as usize];
        px[0] = mix(px[0], color.r, a);
        px[1] = mix(px[1], color.g, a);
        px[2] = mix(px[2], color.b, a);
        px[3] = 255;
    }

    /// Pixel range `[lo, hi)` covering `[min, max]`, clipped to `limit`.
    fn span(min: f32, max: f32, limit: u32) -> (i64, i64) {
        let lo = (min.floor() as i64).max(0);
        let hi = (max.ceil() as i64 + 1).min(limit as i64);
        (lo, hi)
    }

    fn disc(&mut self, center: Vec2, radius: f32, blur: f32, color: Color, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 || radius <= 0.0 || !center.is_finite() {
            return;
        }
        let outer = radius + blur.max(0.0) + 0.5;
        let (x0, x1) = Self::span(center.x - outer, center.x + outer, self.width);
        let (y0, y1) = Self::span(center.y - outer, center.y + outer, self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                let coverage = if blur > 0.0 {
                    if d <= radius {
                        1.0
                    } else {
                        let t = 1.0 - (d - radius) / blur;
                        if t <= 0.0 {
                            continue;
                        }
                        t * t
                    }
                } else {
                    (radius + 0.5 - d).clamp(0.0, 1.0)
                };
                if coverage > 0.0 {
                    self.blend(x, y, color, alpha * coverage);
                }
            }
        }
    }

    /// Xiaolin Wu's anti-aliased line.
    fn wu_line(&mut self, from: Vec2, to: Vec2, color: Color, alpha: f32) {
        let (mut a, mut b) = (from, to);
        let steep = (b.y - a.y).abs() > (b.x - a.x).abs();
        if steep {
            a = Vec2::new(a.y, a.x);
            b = Vec2::new(b.y, b.x);
        }
        if a.x > b.x {
            std::mem::swap(&mut a, &mut b);
        }
        let dx = b.x - a.x;
        let gradient = if dx.abs() < f32::EPSILON { 1.0 } else { (b.y - a.y) / dx };

        let x_start = a.x.round() as i64;
        let x_end = b.x.round() as i64;
        let mut y = a.y + gradient * (x_start as f32 - a.x);

        for x in x_start..=x_end {
            let base = y.floor();
            let frac = y - base;
            let (p, q) = if steep {
                ((base as i64, x), (base as i64 + 1, x))
            } else {
                ((x, base as i64), (x, base as i64 + 1))
            };
            self.blend(p.0, p.1, color, alpha * (1.0 - frac));
            self.blend(q.0, q.1, color, alpha * frac);
            y += gradient;
        }
    }
}

#[inline]
fn mix(dst: u8, src: u8, a: f32) -> u8 {
    (dst as f32 + (src as f32 - dst as f32) * a).round().clamp(0.0, 255.0) as u8
}

/// Like [`mix`], but always moves at least one step toward `src`, so a
/// repeated low-alpha fade settles exactly on the target color.
#[inline]
fn fade_toward(dst: u8, src: u8, a: f32) -> u8 {
    let v = dst as f32 + (src as f32 - dst as f32) * a;
    let v = if src < dst { v.floor() } else { v.ceil() };
    v.clamp(0.0, 255.0) as u8
}

impl Surface for Canvas {
    fn bounds(&self) -> Bounds {
        Bounds::from((self.width, self.height))
    }

    fn resize(&mut self, bounds: Bounds) {
        let width = bounds.width.max(0.0).round() as u32;
        let height = bounds.height.max(0.0).round() as u32;
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reallocate();
        }
    }

    fn fade(&mut self, color: Color, alpha: f32) {
        let a = alpha.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        for px in &mut self.pixels {
            px[0] = fade_toward(px[0], color.r, a);
            px[1] = fade_toward(px[1], color.g, a);
            px[2] = fade_toward(px[2], color.b, a);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        self.disc(center, radius, 0.0, color, alpha);
    }

    fn glow_circle(&mut self, center: Vec2, radius: f32, blur: f32, color: Color, alpha: f32) {
        self.disc(center, radius, blur, color, alpha);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 || width <= 0.0 || !from.is_finite() || !to.is_finite() {
            return;
        }
        // Hairlines fade with their width; wider strokes are drawn as
        // parallel hairlines one pixel apart.
        let passes = width.ceil().max(1.0) as i32;
        let per_pass = alpha * (width / passes as f32).min(1.0);
        let dir = (to - from).normalize_or_zero();
        let normal = Vec2::new(-dir.y, dir.x);
        for i in 0..passes {
            let offset = normal * (i as f32 - (passes - 1) as f32 * 0.5);
            self.wu_line(from + offset, to + offset, color, per_pass);
        }
    }
}
