//! Frame painting.
//!
//! Layers, bottom to top:
//! 1. a translucent background overlay (instead of a clear, leaving trails)
//! 2. the ambient network: connection lines, then nodes with a soft glow
//! 3. the particles, each a disc followed by a smaller glowing core

use glam::Vec2;

use crate::config::EngineConfig;
use crate::palette::Color;
use crate::particle::AmbientNode;
use crate::store::ParticleStore;
use crate::surface::Surface;

/// Glow disc of a node is this much larger than the node.
const NODE_GLOW_SCALE: f32 = 1.5;
/// Glow core of a particle is this fraction of the particle.
const PARTICLE_GLOW_SCALE: f32 = 0.5;
const NODE_ALPHA: f32 = 0.6;
const NODE_GLOW_ALPHA: f32 = 0.3;

/// Paints [`ParticleStore`] state onto a [`Surface`].
#[derive(Debug, Clone, PartialEq)]
pub struct Renderer {
    pub background: Color,
    pub trail_alpha: f32,
    pub connection_radius: f32,
    pub connection_color: Color,
    pub connection_opacity: f32,
    pub connection_width: f32,
    pub node_color: Color,
    pub node_glow_blur: f32,
    pub particle_glow_blur: f32,
}

impl Renderer {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            background: config.background,
            trail_alpha: config.trail_alpha,
            connection_radius: config.connection_radius,
            connection_color: config.connection_color,
            connection_opacity: config.connection_opacity,
            connection_width: config.connection_width,
            node_color: config.node_color,
            node_glow_blur: config.node_glow_blur,
            particle_glow_blur: config.particle_glow_blur,
        }
    }

    /// Paint one frame.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, store: &ParticleStore) {
        surface.fade(self.background, self.trail_alpha);
        self.draw_network(surface, store.nodes());

        for p in store.particles() {
            surface.fill_circle(p.position(), p.size(), p.color(), p.opacity());
            surface.glow_circle(
                p.position(),
                p.size() * PARTICLE_GLOW_SCALE,
                self.particle_glow_blur,
                p.color(),
                p.opacity(),
            );
        }
    }

    fn draw_network<S: Surface + ?Sized>(&self, surface: &mut S, nodes: &[AmbientNode]) {
        for (a, b, opacity) in connections(nodes, self.connection_radius, self.connection_opacity) {
            surface.stroke_line(a, b, self.connection_width, self.connection_color, opacity);
        }
        for node in nodes {
            surface.fill_circle(node.position(), node.size(), self.node_color, node.opacity() * NODE_ALPHA);
            surface.glow_circle(
                node.position(),
                node.size() * NODE_GLOW_SCALE,
                self.node_glow_blur,
                self.node_color,
                node.opacity() * NODE_GLOW_ALPHA,
            );
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

/// Every unordered node pair closer than `radius`, with its line opacity.
///
/// Opacity falls off linearly: `(1 - distance / radius) * base_opacity`.
/// Nodes are binned into a uniform grid of `radius`-sized cells so only
/// neighbouring cells are compared.
pub fn connections(nodes: &[AmbientNode], radius: f32, base_opacity: f32) -> Vec<(Vec2, Vec2, f32)> {
    if nodes.len() < 2 || radius <= 0.0 {
        return Vec::new();
    }

    let cell_of = |p: Vec2| ((p.x / radius).floor() as i64, (p.y / radius).floor() as i64);
    let mut grid: std::collections::HashMap<(i64, i64), Vec<usize>> = std::collections::HashMap::new();
    for (i, node) in nodes.iter().enumerate() {
        grid.entry(cell_of(node.position())).or_default().push(i);
    }

    let mut pairs = Vec::new();
    for (i, node) in nodes.iter().enumerate() {
        let p = node.position();
        let (cx, cy) = cell_of(p);
        for dy in -1..=1 {
            for dx in -1..=1 {
                let Some(bucket) = grid.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                for &j in bucket {
                    if j <= i {
                        continue;
                    }
                    let q = nodes[j].position();
                    let distance = p.distance(q);
                    if distance < radius {
                        pairs.push((i, j, (1.0 - distance / radius) * base_opacity));
                    }
                }
            }
        }
    }

    // Stable draw order regardless of grid iteration order
    pairs.sort_unstable_by_key(|&(i, j, _)| (i, j));
    pairs
        .into_iter()
        .map(|(i, j, opacity)| (nodes[i].position(), nodes[j].position(), opacity))
        .collect()
}
