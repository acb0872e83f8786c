//! Fixed-timestep physics update.
//!
//! One call to [`Integrator::step`] advances every particle and every ambient
//! node by exactly one virtual timestep. Wall-clock time never enters the
//! update, so a stuttering host cannot skip or double-apply a step.

use crate::config::EngineConfig;
use crate::store::ParticleStore;

/// Spring-toward-target integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integrator {
    /// Fraction of the remaining displacement added to velocity each step.
    pub stiffness: f32,
    /// Velocity multiplier applied after the spring term, `1 - damping`.
    pub damping_factor: f32,
}

impl Integrator {
    pub fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            stiffness,
            damping_factor: 1.0 - damping,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.spring_stiffness, config.damping)
    }

    /// Advance all particles, then all ambient nodes.
    pub fn step(&self, store: &mut ParticleStore) {
        for particle in store.particles_mut() {
            particle.spring_step(self.stiffness, self.damping_factor);
        }
        let bounds = store.bounds();
        for node in store.nodes_mut() {
            node.drift(bounds);
        }
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;
    use crate::shapes::{Bounds, Shape};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn store() -> ParticleStore {
        ParticleStore::new(
            200,
            30,
            Bounds::new(800.0, 600.0),
            Shape::Sphere,
            Palette::Neon,
            Box::new(SmallRng::seed_from_u64(9)),
        )
    }

    #[test]
    fn test_converges_to_static_target() {
        let mut s = store();
        s.retarget(Shape::Spiral);
        let integrator = Integrator::new(0.2, 0.1);
        for _ in 0..500 {
            integrator.step(&mut s);
        }
        for p in s.particles() {
            assert!(p.position().distance(p.target()) < 0.01);
        }
    }

    #[test]
    fn test_default_constants_converge() {
        let mut s = store();
        s.retarget(Shape::Cube);
        let integrator = Integrator::default();
        for _ in 0..1000 {
            integrator.step(&mut s);
        }
        for p in s.particles() {
            assert!(p.position().distance(p.target()) < 0.01);
        }
    }

    #[test]
    fn test_nodes_stay_in_bounds() {
        let mut s = store();
        let integrator = Integrator::default();
        for _ in 0..5000 {
            integrator.step(&mut s);
            for node in s.nodes() {
                assert!(s.bounds().contains(node.position()));
            }
        }
    }

    #[test]
    fn test_particle_at_rest_stays_put() {
        let mut s = store();
        let before: Vec<_> = s.particles().iter().map(|p| p.position()).collect();
        Integrator::default().step(&mut s);
        for (p, old) in s.particles().iter().zip(before) {
            assert_eq!(p.position(), old);
        }
    }
}
