//! Wandering flock around the planet.

use std::f32::consts::{PI, TAU};

use rand::Rng;

use super::config::FlockConfig;
use crate::core::types::{Quat, Vec3};

#[derive(Clone, Copy, Debug)]
pub struct Bird {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Wing-beat phase
    pub phase: f32,
}

impl Bird {
    /// Rotation turning +Z toward the flight direction
    pub fn heading(&self) -> Quat {
        let dir = self.velocity.normalize_or_zero();
        if dir == Vec3::ZERO {
            return Quat::IDENTITY;
        }
        Quat::from_rotation_arc(Vec3::Z, dir)
    }
}

/// Birds that drift within a spherical shell, pulled back when they stray.
pub struct Flock {
    config: FlockConfig,
    birds: Vec<Bird>,
}

impl Flock {
    pub fn new<R: Rng + ?Sized>(config: FlockConfig, rng: &mut R) -> Self {
        let birds = (0..config.count)
            .map(|_| {
                let r = rng.gen_range(config.spawn_radius.0..config.spawn_radius.1);
                let theta = rng.gen_range(0.0..TAU);
                // Uniform in phi, not by area
                let phi = rng.gen_range(0.0..PI);
                let position = Vec3::new(
                    r * phi.sin() * theta.cos(),
                    r * phi.cos(),
                    r * phi.sin() * theta.sin(),
                );
                let velocity = random_centered(rng).normalize_or(Vec3::X) * config.initial_speed;
                Bird {
                    position,
                    velocity,
                    phase: rng.gen_range(0.0..TAU),
                }
            })
            .collect();
        Self { config, birds }
    }

    pub fn birds(&self) -> &[Bird] {
        &self.birds
    }

    /// Advance one frame. Velocity is in units per frame, rescaled by `dt`.
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        let c = &self.config;
        for bird in &mut self.birds {
            bird.position += bird.velocity;

            let dist = bird.position.length();
            let outward = bird.position.normalize_or_zero();
            if dist > c.outer_radius {
                bird.velocity -= outward * c.steer;
            } else if dist < c.inner_radius {
                bird.velocity += outward * c.steer;
            }

            bird.velocity += random_centered(rng) * c.wander;
            bird.velocity = bird.velocity.normalize_or_zero() * c.speed * dt;
        }
    }
}

/// Each component in `[-0.5, 0.5)`
fn random_centered<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(
        rng.gen_range(-0.5..0.5),
        rng.gen_range(-0.5..0.5),
        rng.gen_range(-0.5..0.5),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_spawn_shell() {
        let mut rng = StdRng::seed_from_u64(8);
        let flock = Flock::new(FlockConfig::default(), &mut rng);
        assert_eq!(flock.birds().len(), 100);
        for bird in flock.birds() {
            let r = bird.position.length();
            assert!(r >= 24.99 && r <= 40.01);
            assert!((bird.velocity.length() - 0.1).abs() < 1e-5);
        }
    }

    #[test]
    fn test_speed_follows_dt() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut flock = Flock::new(FlockConfig::default(), &mut rng);
        flock.update(1.0 / 60.0, &mut rng);
        for bird in flock.birds() {
            assert!((bird.velocity.length() - 10.0 / 60.0).abs() < 1e-4);
            let forward = bird.heading() * Vec3::Z;
            assert!((forward - bird.velocity.normalize()).length() < 1e-3);
        }
    }

    #[test]
    fn test_stray_bird_pulled_back() {
        let mut rng = StdRng::seed_from_u64(10);
        let config = FlockConfig { count: 1, wander: 0.0, ..Default::default() };
        let mut flock = Flock::new(config, &mut rng);
        flock.birds[0].position = Vec3::new(60.0, 0.0, 0.0);
        flock.birds[0].velocity = Vec3::ZERO;
        flock.update(1.0 / 60.0, &mut rng);
        assert!(flock.birds()[0].velocity.x < 0.0);
    }
}
