//! Planet and sculpting configuration.

use serde::{Deserialize, Serialize};

/// One noise sample: frequency multiplier on the base scale and its amplitude
/// as a fraction of the global height scale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseOctave {
    pub frequency: f64,
    pub amplitude: f64,
}

/// Parameters controlling the planet shape
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetConfig {
    /// Undisplaced ("sea level") radius
    pub planet_radius: f32,
    /// Width and height segment count of the UV sphere
    pub subdivisions: u32,
    /// Base noise frequency (octave frequencies multiply this)
    pub noise_scale: f64,
    /// Global displacement amplitude
    pub height_scale: f64,
    pub octaves: [NoiseOctave; 3],
    /// Sculpted radius never drops below `planet_radius * min_radius_factor`
    pub min_radius_factor: f32,
    /// Sculpted radius never exceeds `planet_radius * max_radius_factor`
    pub max_radius_factor: f32,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            planet_radius: 15.0,
            subdivisions: 64,
            noise_scale: 0.2,
            height_scale: 1.2,
            octaves: [
                NoiseOctave { frequency: 10.0, amplitude: 1.0 },
                NoiseOctave { frequency: 20.0, amplitude: 0.5 },
                NoiseOctave { frequency: 40.0, amplitude: 0.25 },
            ],
            min_radius_factor: 0.7,
            max_radius_factor: 1.5,
        }
    }
}

impl PlanetConfig {
    pub fn min_radius(&self) -> f32 {
        self.planet_radius * self.min_radius_factor
    }

    pub fn max_radius(&self) -> f32 {
        self.planet_radius * self.max_radius_factor
    }
}

/// Brush limits and per-application strengths
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SculptConfig {
    /// Starting angular brush radius in radians
    pub initial_radius: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Radial change at the brush center per raise/lower application
    pub strength: f32,
    /// Flatten relaxes toward `planet_radius + flatten_offset`
    pub flatten_offset: f32,
    /// Fraction of the remaining distance covered per flatten application
    pub flatten_rate: f32,
    /// Radians of brush radius per unit of wheel delta
    pub wheel_sensitivity: f32,
}

impl Default for SculptConfig {
    fn default() -> Self {
        Self {
            initial_radius: 0.15,
            min_radius: 0.05,
            max_radius: 0.4,
            strength: 0.2,
            flatten_offset: 0.5,
            flatten_rate: 0.05,
            wheel_sensitivity: 0.001,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planet_config_default() {
        let config = PlanetConfig::default();
        assert_eq!(config.planet_radius, 15.0);
        assert_eq!(config.subdivisions, 64);
        assert_eq!(config.min_radius(), 15.0 * 0.7);
        assert_eq!(config.max_radius(), 22.5);
        assert_eq!(config.octaves[2].frequency, 40.0);
    }

    #[test]
    fn test_partial_json_override() {
        let config: PlanetConfig = serde_json::from_str(r#"{"subdivisions": 8}"#).unwrap();
        assert_eq!(config.subdivisions, 8);
        assert_eq!(config.planet_radius, 15.0);
    }

    #[test]
    fn test_sculpt_config_default() {
        let config = SculptConfig::default();
        assert!(config.min_radius < config.initial_radius);
        assert!(config.initial_radius < config.max_radius);
        assert_eq!(config.strength, 0.2);
    }
}
