//! Audio levels.

use serde::{Deserialize, Serialize};

/// Maximum gain per channel and the ducking applied while the pointer is free.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub meadow_max: f32,
    pub space_max: f32,
    pub walking_volume: f32,
    pub sculpting_volume: f32,
    /// Ambient master while the pointer is not captured
    pub unfocused_ducking: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            meadow_max: 0.5,
            space_max: 0.6,
            walking_volume: 0.4,
            sculpting_volume: 0.5,
            unfocused_ducking: 0.4,
        }
    }
}

/// User-adjustable volume settings
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub ambient_volume: f32,
    pub effects_volume: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            ambient_volume: 1.0,
            effects_volume: 1.0,
            muted: false,
        }
    }
}
