//! Textured cloud sprites orbiting the planet.

use rand::Rng;

use super::config::CloudConfig;
use crate::core::types::Vec3;
use crate::math::sphere::{direction_from_angles, sample_uniform_direction};

/// One cloud on the orbit shell
#[derive(Clone, Copy, Debug)]
pub struct Cloud {
    pub theta: f32,
    pub phi: f32,
    /// Orbital speed in radians per second
    pub speed: f32,
    /// Polar drift in radians per second; reverses near the poles
    pub vertical_drift: f32,
    /// Edge length of the cloud quad
    pub size: f32,
    pub opacity: f32,
}

impl Cloud {
    fn spawn<R: Rng + ?Sized>(config: &CloudConfig, rng: &mut R) -> Self {
        let start = sample_uniform_direction(rng);
        let big = rng.gen_range(0.0..1.0f32) > 1.0 - config.big_fraction;
        let size = if big {
            rng.gen_range(config.big_size.0..config.big_size.1)
        } else {
            rng.gen_range(config.small_size.0..config.small_size.1)
        };
        let opacity = if big {
            config.big_opacity
        } else {
            rng.gen_range(config.small_opacity.0..config.small_opacity.1)
        };
        Self {
            theta: start.theta as f32,
            phi: start.phi as f32,
            speed: rng.gen_range(config.speed.0..config.speed.1),
            vertical_drift: rng.gen_range(-config.max_drift..config.max_drift),
            size,
            opacity,
        }
    }

    /// Outward direction from the planet center
    pub fn direction(&self) -> Vec3 {
        direction_from_angles(self.theta as f64, self.phi as f64).as_vec3()
    }
}

/// All clouds sharing one orbit radius
pub struct CloudLayer {
    orbit_radius: f32,
    min_phi: f32,
    max_phi: f32,
    clouds: Vec<Cloud>,
}

impl CloudLayer {
    pub fn new<R: Rng + ?Sized>(config: &CloudConfig, planet_radius: f32, rng: &mut R) -> Self {
        let clouds = (0..config.count).map(|_| Cloud::spawn(config, rng)).collect();
        Self {
            orbit_radius: planet_radius + config.orbit_offset,
            min_phi: config.phi_bounds.0,
            max_phi: config.phi_bounds.1,
            clouds,
        }
    }

    pub fn orbit_radius(&self) -> f32 {
        self.orbit_radius
    }

    pub fn clouds(&self) -> &[Cloud] {
        &self.clouds
    }

    /// World position of a cloud
    pub fn position(&self, cloud: &Cloud) -> Vec3 {
        cloud.direction() * self.orbit_radius
    }

    pub fn update(&mut self, dt: f32) {
        for cloud in &mut self.clouds {
            cloud.theta += cloud.speed * dt;
            cloud.phi += cloud.vertical_drift * dt;
            if cloud.phi < self.min_phi || cloud.phi > self.max_phi {
                cloud.vertical_drift = -cloud.vertical_drift;
            }
        }
    }
}
