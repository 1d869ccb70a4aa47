//! Scenery configuration

use serde::{Deserialize, Serialize};

use crate::atmosphere::hex_rgb;

/// Cloud layer tuning
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    pub count: usize,
    /// Orbit height above the planet radius
    pub orbit_offset: f32,
    /// Share of clouds drawn large and faint
    pub big_fraction: f32,
    pub big_size: (f32, f32),
    pub small_size: (f32, f32),
    pub big_opacity: f32,
    pub small_opacity: (f32, f32),
    /// Orbital speed range in radians per second
    pub speed: (f32, f32),
    /// Largest polar drift magnitude in radians per second
    pub max_drift: f32,
    /// Polar band the drift keeps clouds inside
    pub phi_bounds: (f32, f32),
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            count: 80,
            orbit_offset: 5.0,
            big_fraction: 0.2,
            big_size: (15.0, 25.0),
            small_size: (6.0, 10.0),
            big_opacity: 0.3,
            small_opacity: (0.6, 0.8),
            speed: (0.01, 0.03),
            max_drift: 0.0025,
            phi_bounds: (0.2, 2.9),
        }
    }
}

/// Bird flock tuning
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockConfig {
    pub count: usize,
    /// Distance range from the center at spawn
    pub spawn_radius: (f32, f32),
    /// Birds beyond this distance steer inward
    pub outer_radius: f32,
    /// Birds inside this distance steer outward
    pub inner_radius: f32,
    pub steer: f32,
    /// Random velocity jitter per frame
    pub wander: f32,
    /// Cruise speed in units per second
    pub speed: f32,
    /// Velocity length at spawn, in units per frame
    pub initial_speed: f32,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            count: 100,
            spawn_radius: (25.0, 40.0),
            outer_radius: 50.0,
            inner_radius: 20.0,
            steer: 0.001,
            wander: 0.005,
            speed: 10.0,
            initial_speed: 0.1,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MoonConfig {
    /// Radius of the fallback sphere
    pub radius: f32,
    pub color: [f32; 3],
    /// Distance offset from the planet radius
    pub orbit_offset: f32,
    /// Path of the moon model asset
    pub model_path: String,
}

impl Default for MoonConfig {
    fn default() -> Self {
        Self {
            radius: 4.0,
            color: hex_rgb(0xffffee),
            orbit_offset: 80.0,
            model_path: "assets/models/moon.glb".to_string(),
        }
    }
}

/// Translucent sea shell slightly under the base radius
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterConfig {
    pub enabled: bool,
    /// Offset from the planet radius (negative sits below it)
    pub radius_offset: f32,
    pub color: [f32; 3],
    pub opacity: f32,
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            radius_offset: -0.5,
            color: hex_rgb(0x1e6091),
            opacity: 0.7,
        }
    }
}

/// Everything decorative around the planet
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneryConfig {
    pub clouds: CloudConfig,
    pub birds: FlockConfig,
    pub moon: MoonConfig,
    pub water: WaterConfig,
}
