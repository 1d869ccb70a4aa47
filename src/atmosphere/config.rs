//! Altitude-driven atmosphere settings.

use serde::{Deserialize, Serialize};

use super::color::hex_rgb;

/// Sky-to-space blend parameters. Altitudes are offsets above the planet radius.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmosphereConfig {
    /// Altitude above the surface radius where the sky starts to fade.
    pub start_offset: f32,
    /// Altitude above the surface radius where space is fully reached.
    pub end_offset: f32,
    /// Background color on the ground.
    pub sky_color: [f32; 3],
    /// Background color in space.
    pub space_color: [f32; 3],
    /// Rim glow color of the atmosphere shell.
    pub glow_color: [f32; 3],
    /// Atmosphere shell radius above the planet radius.
    pub glow_offset: f32,
    pub stars: StarFieldConfig,
}

impl Default for AtmosphereConfig {
    fn default() -> Self {
        Self {
            start_offset: 2.0,
            end_offset: 12.0,
            sky_color: hex_rgb(0x87ceeb),
            space_color: hex_rgb(0x0a0a15),
            glow_color: hex_rgb(0x88ccff),
            glow_offset: 0.5,
            stars: StarFieldConfig::default(),
        }
    }
}

/// Background star shell
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StarFieldConfig {
    pub count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_size: f32,
    pub max_size: f32,
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self {
            count: 3000,
            min_radius: 150.0,
            max_radius: 500.0,
            min_size: 0.3,
            max_size: 1.8,
        }
    }
}
