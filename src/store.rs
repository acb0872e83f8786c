//! Owner of all mutable particle and ambient-node state.

use rand::RngCore;

use crate::palette::Palette;
use crate::particle::{AmbientNode, Particle};
use crate::shapes::{point_for, Bounds, Shape};

/// Fixed-size collection of particles plus the ambient network nodes.
///
/// The particle count never changes after construction. Ambient nodes keep
/// their count but are rebuilt on [`reseed_ambient`](Self::reseed_ambient).
pub struct ParticleStore {
    particles: Vec<Particle>,
    nodes: Vec<AmbientNode>,
    node_count: usize,
    bounds: Bounds,
    rng: Box<dyn RngCore>,
}

impl ParticleStore {
    /// Create `particle_count` particles resting on `shape` and
    /// `node_count` randomly placed ambient nodes.
    pub fn new(
        particle_count: usize,
        node_count: usize,
        bounds: Bounds,
        shape: Shape,
        palette: Palette,
        mut rng: Box<dyn RngCore>,
    ) -> Self {
        let particles = (0..particle_count)
            .map(|i| Particle::spawn(point_for(shape, i, particle_count, bounds), palette, rng.as_mut()))
            .collect();
        let nodes = (0..node_count)
            .map(|_| AmbientNode::random(bounds, rng.as_mut()))
            .collect();

        Self {
            particles,
            nodes,
            node_count,
            bounds,
            rng,
        }
    }

    /// Point every particle at its slot on `shape`.
    ///
    /// Positions and velocities are left alone; the integrator carries the
    /// particles over on the following frames.
    pub fn retarget(&mut self, shape: Shape) {
        let total = self.particles.len();
        let bounds = self.bounds;
        for (i, particle) in self.particles.iter_mut().enumerate() {
            particle.set_target(point_for(shape, i, total, bounds));
        }
    }

    /// Give every particle an independent random color from `palette`.
    pub fn recolor(&mut self, palette: Palette) {
        for particle in &mut self.particles {
            particle.set_color(palette.pick(self.rng.as_mut()));
        }
    }

    /// Adopt `bounds` and replace every ambient node with a fresh random one.
    pub fn reseed_ambient(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        let rng = self.rng.as_mut();
        self.nodes = (0..self.node_count)
            .map(|_| AmbientNode::random(bounds, rng))
            .collect();
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn nodes(&self) -> &[AmbientNode] {
        &self.nodes
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [AmbientNode] {
        &mut self.nodes
    }
}

impl std::fmt::Debug for ParticleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleStore")
            .field("particles", &self.particles.len())
            .field("nodes", &self.nodes.len())
            .field("bounds", &self.bounds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn store(seed: u64) -> ParticleStore {
        ParticleStore::new(
            64,
            12,
            Bounds::new(800.0, 600.0),
            Shape::Sphere,
            Palette::Rainbow,
            Box::new(SmallRng::seed_from_u64(seed)),
        )
    }

    #[test]
    fn test_new_store_counts() {
        let s = store(1);
        assert_eq!(s.particles().len(), 64);
        assert_eq!(s.nodes().len(), 12);
        for node in s.nodes() {
            assert!(s.bounds().contains(node.position()));
        }
    }

    #[test]
    fn test_seeded_stores_match() {
        let a = store(42);
        let b = store(42);
        assert_eq!(a.particles(), b.particles());
        assert_eq!(a.nodes(), b.nodes());
    }

    #[test]
    fn test_retarget_keeps_motion_state() {
        let mut s = store(2);
        let before: Vec<_> = s.particles().to_vec();
        s.retarget(Shape::Wave);
        for (i, (old, new)) in before.iter().zip(s.particles()).enumerate() {
            assert_eq!(old.position(), new.position());
            assert_eq!(old.velocity(), new.velocity());
            assert_eq!(new.target(), point_for(Shape::Wave, i, 64, s.bounds()));
        }
    }

    #[test]
    fn test_recolor_only_touches_color() {
        let mut s = store(3);
        let before: Vec<_> = s.particles().to_vec();
        s.recolor(Palette::Nature);
        for (old, new) in before.iter().zip(s.particles()) {
            assert_eq!(old.position(), new.position());
            assert_eq!(old.target(), new.target());
            assert_eq!(old.velocity(), new.velocity());
            assert!(Palette::Nature.colors().contains(&new.color()));
        }
    }

    #[test]
    fn test_reseed_ambient_uses_new_bounds() {
        let mut s = store(4);
        let small = Bounds::new(50.0, 40.0);
        s.reseed_ambient(small);
        assert_eq!(s.bounds(), small);
        assert_eq!(s.nodes().len(), 12);
        for node in s.nodes() {
            assert!(small.contains(node.position()));
        }
    }
}
