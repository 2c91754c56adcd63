//! Ball trail particles
//!
//! A fixed pool: dead particles are recycled in place, so the pool never
//! grows after construction.

use glam::{Vec2, Vec4};
use rand::Rng;

use super::body::Body;

/// A particle for visual effects
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Vec4,
    /// Seconds left; dead at or below zero
    pub life: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            color: Vec4::ONE,
            life: 0.0,
        }
    }
}

impl Particle {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

#[derive(Debug, Clone)]
pub struct ParticleGenerator {
    particles: Vec<Particle>,
}

impl ParticleGenerator {
    pub fn new(amount: usize) -> Self {
        Self {
            particles: vec![Particle::default(); amount],
        }
    }

    /// Emit `new_particles` from `source` and age the rest
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        dt: f32,
        source: &Body,
        new_particles: usize,
        offset: Vec2,
    ) {
        if self.particles.is_empty() {
            return;
        }

        for _ in 0..new_particles {
            let index = self.first_unused();
            respawn(rng, &mut self.particles[index], source, offset);
        }

        for particle in &mut self.particles {
            particle.life -= dt;
            if particle.is_alive() {
                particle.position -= particle.velocity * dt;
                particle.color.w -= dt * 2.5;
            }
        }
    }

    /// First dead slot, falling back to the oldest-allocated one
    fn first_unused(&self) -> usize {
        self.particles
            .iter()
            .position(|p| !p.is_alive())
            .unwrap_or(0)
    }

    pub fn alive(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_alive())
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    /// Kill every particle
    pub fn clear(&mut self) {
        for particle in &mut self.particles {
            particle.life = 0.0;
        }
    }
}

fn respawn<R: Rng + ?Sized>(rng: &mut R, particle: &mut Particle, source: &Body, offset: Vec2) {
    let jitter = (rng.random_range(0..100) - 50) as f32 / 10.0;
    let shade = 0.5 + rng.random_range(0..100) as f32 / 100.0;
    particle.position = source.position + Vec2::splat(jitter) + offset;
    particle.color = Vec4::new(shade, shade, shade, 1.0);
    particle.life = 1.0;
    particle.velocity = source.velocity * 0.1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::Sprite;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn source() -> Body {
        Body::new(Vec2::new(100.0, 100.0), Vec2::splat(25.0), Sprite::Ball)
            .with_velocity(Vec2::new(100.0, 200.0))
    }

    #[test]
    fn test_emits_and_ages() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut particles = ParticleGenerator::new(10);
        particles.update(&mut rng, 0.1, &source(), 2, Vec2::ZERO);
        assert_eq!(particles.alive().count(), 2);

        for p in particles.alive() {
            assert!((p.life - 0.9).abs() < 1e-5);
            assert!((p.color.w - 0.75).abs() < 1e-5);
            assert!((p.position.x - 100.0).abs() <= 6.0);
        }
    }

    #[test]
    fn test_particles_die() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut particles = ParticleGenerator::new(10);
        particles.update(&mut rng, 0.1, &source(), 2, Vec2::ZERO);
        particles.update(&mut rng, 1.0, &source(), 0, Vec2::ZERO);
        assert_eq!(particles.alive().count(), 0);
    }

    #[test]
    fn test_pool_never_grows() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut particles = ParticleGenerator::new(4);
        for _ in 0..10 {
            particles.update(&mut rng, 0.01, &source(), 3, Vec2::ZERO);
        }
        assert_eq!(particles.capacity(), 4);
        assert_eq!(particles.alive().count(), 4);
        particles.clear();
        assert_eq!(particles.alive().count(), 0);
    }
}
