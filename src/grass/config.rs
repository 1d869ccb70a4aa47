//! Grass placement and blade shape settings.

use serde::{Deserialize, Serialize};

/// Global grass settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GrassConfig {
    /// Target blade count for a freshly generated planet.
    pub blade_count: usize,
    /// Target blade count when sampling restored (possibly sculpted) terrain.
    pub restored_blade_count: usize,
    /// Attempt budget as a multiple of the target count.
    pub attempt_factor: usize,
    /// Base width of a blade.
    pub blade_width: f32,
    /// Minimum blade height.
    pub blade_height: f32,
    /// Extra random height on top of `blade_height`.
    pub blade_height_variation: f32,
    /// Sideways displacement of the tip.
    pub tip_offset: f32,
    /// Displacement below which the ground is sand (before `biome_scale`).
    pub sand_level: f32,
    /// Displacement above which the ground is rock (before `biome_scale`).
    pub rock_level: f32,
    /// Multiplier applied to `sand_level` and `rock_level` for placement.
    pub biome_scale: f32,
    /// In-band candidates are kept when a uniform draw is at most this value.
    pub thinning: f32,
}

impl Default for GrassConfig {
    fn default() -> Self {
        Self {
            blade_count: 80_000,
            restored_blade_count: 40_000,
            attempt_factor: 3,
            blade_width: 0.15,
            blade_height: 0.15,
            blade_height_variation: 0.3,
            tip_offset: 0.05,
            sand_level: -0.2,
            rock_level: 0.5,
            biome_scale: 3.0,
            thinning: 0.7,
        }
    }
}

impl GrassConfig {
    /// Lowest displacement that still receives grass.
    pub fn min_displacement(&self) -> f32 {
        self.sand_level * self.biome_scale
    }

    /// Highest displacement that still receives grass.
    pub fn max_displacement(&self) -> f32 {
        self.rock_level * self.biome_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_band() {
        let cfg = GrassConfig::default();
        assert!((cfg.min_displacement() + 0.6).abs() < 1e-6);
        assert!((cfg.max_displacement() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_partial_override() {
        let cfg: GrassConfig = serde_json::from_str(r#"{"blade_count": 10}"#).unwrap();
        assert_eq!(cfg.blade_count, 10);
        assert_eq!(cfg.restored_blade_count, 40_000);
    }
}
