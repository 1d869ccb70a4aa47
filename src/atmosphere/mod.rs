//! Altitude-driven sky.
//!
//! The background blends from sky to space as the camera climbs away from
//! the planet, and the star field fades in over the same range. The main
//! entry point is [`AtmosphereSystem`], updated once per frame.

pub mod color;
pub mod config;
pub mod stars;

pub use color::{Lerp, hex_rgb};
pub use config::{AtmosphereConfig, StarFieldConfig};
pub use stars::{Star, generate_stars};

use rand::Rng;

use crate::core::types::Vec3;

/// Per-frame atmosphere outputs handed to the renderer and audio mixer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtmosphereState {
    /// 0 on the ground, 1 in space
    pub blend: f32,
    pub background: [f32; 3],
    pub star_opacity: f32,
    /// Seconds since start, drives star twinkle
    pub twinkle_time: f32,
    /// Camera position for the rim glow
    pub view_vector: Vec3,
    pub glow_color: [f32; 3],
}

/// Owns the star field and the current blend.
pub struct AtmosphereSystem {
    config: AtmosphereConfig,
    start: f32,
    end: f32,
    stars: Vec<Star>,
    state: AtmosphereState,
}

impl AtmosphereSystem {
    pub fn new<R: Rng + ?Sized>(config: AtmosphereConfig, planet_radius: f32, rng: &mut R) -> Self {
        let stars = generate_stars(&config.stars, rng);
        let state = AtmosphereState {
            blend: 0.0,
            background: config.sky_color,
            star_opacity: 0.0,
            twinkle_time: 0.0,
            view_vector: Vec3::ZERO,
            glow_color: config.glow_color,
        };
        Self {
            start: planet_radius + config.start_offset,
            end: planet_radius + config.end_offset,
            config,
            stars,
            state,
        }
    }

    pub fn config(&self) -> &AtmosphereConfig {
        &self.config
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn state(&self) -> &AtmosphereState {
        &self.state
    }

    /// Sky-to-space blend for a distance from the planet center.
    pub fn blend_at(&self, altitude: f32) -> f32 {
        let span = self.end - self.start;
        if span <= 0.0 {
            return if altitude >= self.end { 1.0 } else { 0.0 };
        }
        ((altitude - self.start) / span).clamp(0.0, 1.0)
    }

    /// Recompute outputs for the camera at `camera_position`.
    pub fn update(&mut self, camera_position: Vec3, elapsed_secs: f32) -> &AtmosphereState {
        let t = self.blend_at(camera_position.length());
        self.state = AtmosphereState {
            blend: t,
            background: self.config.sky_color.lerp(&self.config.space_color, t),
            star_opacity: t,
            twinkle_time: elapsed_secs,
            view_vector: camera_position,
            glow_color: self.config.glow_color,
        };
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn system() -> AtmosphereSystem {
        let config = AtmosphereConfig {
            stars: StarFieldConfig { count: 10, ..Default::default() },
            ..Default::default()
        };
        AtmosphereSystem::new(config, 15.0, &mut StdRng::seed_from_u64(1))
    }

    #[test]
    fn test_blend_range() {
        let sys = system();
        assert_eq!(sys.blend_at(16.0), 0.0);
        assert_eq!(sys.blend_at(17.0), 0.0);
        assert!((sys.blend_at(22.0) - 0.5).abs() < 1e-6);
        assert_eq!(sys.blend_at(27.0), 1.0);
        assert_eq!(sys.blend_at(500.0), 1.0);
    }

    #[test]
    fn test_update_colors() {
        let mut sys = system();
        let ground = *sys.update(Vec3::new(0.0, 16.0, 0.0), 1.0);
        assert_eq!(ground.background, hex_rgb(0x87ceeb));
        assert_eq!(ground.star_opacity, 0.0);

        let space = *sys.update(Vec3::new(0.0, 0.0, 40.0), 2.0);
        let expected = hex_rgb(0x0a0a15);
        for (a, b) in space.background.iter().zip(expected) {
            assert!((a - b).abs() < 1e-6);
        }
        assert_eq!(space.star_opacity, 1.0);
        assert_eq!(space.twinkle_time, 2.0);
        assert_eq!(sys.stars().len(), 10);
    }
}
