//! Cosmetic particle effects
//!
//! Consumes collision and capture events, produces transient decorative
//! state. Nothing here feeds back into gameplay; the spread is drawn from the
//! injected seeded RNG so runs stay reproducible.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{MAX_PARTICLES, Particle};
use crate::consts::PARTICLE_DECAY;

/// Spawn a burst of `count` sparks at `pos`. The oldest particles are dropped
/// to stay under the cap.
pub fn spawn_burst(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    pos: Vec2,
    color: u32,
    count: usize,
) {
    for _ in 0..count {
        if particles.len() >= MAX_PARTICLES {
            particles.remove(0);
        }
        let vel = Vec2::new(rng.random_range(-4.0..4.0), rng.random_range(-4.0..4.0));
        particles.push(Particle {
            pos,
            vel,
            life: 1.0,
            color,
        });
    }
}

/// Advance and expire particles.
pub fn update(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.life -= PARTICLE_DECAY;
    }
    particles.retain(|p| p.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn burst_respects_the_particle_cap() {
        let mut particles = Vec::new();
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..30 {
            spawn_burst(&mut particles, &mut rng, Vec2::ZERO, 0xffffff, 15);
        }
        assert_eq!(particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn particles_decay_and_expire() {
        let mut particles = Vec::new();
        let mut rng = Pcg32::seed_from_u64(1);
        spawn_burst(&mut particles, &mut rng, Vec2::ZERO, 0xffffff, 5);

        // life 1.0, decay 0.03 => gone within 34 ticks
        for _ in 0..34 {
            update(&mut particles);
        }
        assert!(particles.is_empty());
    }

    #[test]
    fn seeded_bursts_are_reproducible() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        spawn_burst(&mut a, &mut Pcg32::seed_from_u64(9), Vec2::ZERO, 0, 8);
        spawn_burst(&mut b, &mut Pcg32::seed_from_u64(9), Vec2::ZERO, 0, 8);
        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.vel, pb.vel);
        }
    }
}
