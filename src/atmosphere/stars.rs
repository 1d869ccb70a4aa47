//! Twinkling star shell around the scene.

use std::f32::consts::{PI, TAU};

use rand::Rng;

use super::config::StarFieldConfig;
use crate::core::types::Vec3;

/// One point star
#[derive(Clone, Copy, Debug)]
pub struct Star {
    pub position: Vec3,
    pub size: f32,
    /// Twinkle phase in radians
    pub phase: f32,
}

impl Star {
    /// Brightness in `[0.4, 1.0]` at `time` seconds.
    pub fn brightness(&self, time: f32) -> f32 {
        let twinkle = 0.5 + 0.5 * (time * 2.0 + self.phase * 10.0).sin();
        0.4 + 0.6 * twinkle
    }
}

/// Scatter stars in a spherical shell. The polar angle is drawn uniformly, so
/// stars bunch toward the poles.
pub fn generate_stars<R: Rng + ?Sized>(config: &StarFieldConfig, rng: &mut R) -> Vec<Star> {
    (0..config.count)
        .map(|_| {
            let r = rng.gen_range(config.min_radius..=config.max_radius);
            let theta = rng.gen_range(0.0..TAU);
            let phi = rng.gen_range(0.0..PI);
            let position = Vec3::new(
                r * phi.sin() * theta.cos(),
                r * phi.cos(),
                r * phi.sin() * theta.sin(),
            );
            Star {
                position,
                size: rng.gen_range(config.min_size..=config.max_size),
                phase: rng.gen_range(0.0..TAU),
            }
        })
        .collect()
}
