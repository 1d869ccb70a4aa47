//! Decorative scenery around the planet: clouds, birds, moon and sea.

pub mod config;
pub mod clouds;
pub mod birds;
pub mod moon;

pub use config::{CloudConfig, FlockConfig, MoonConfig, SceneryConfig, WaterConfig};
pub use clouds::{Cloud, CloudLayer};
pub use birds::{Bird, Flock};
pub use moon::{Moon, MoonAsset, MoonModel};

use rand::Rng;

/// Translucent sphere standing in for sea level
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaterShell {
    pub radius: f32,
    pub color: [f32; 3],
    pub opacity: f32,
}

impl WaterShell {
    pub fn new(config: &WaterConfig, planet_radius: f32) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        Some(Self {
            radius: planet_radius + config.radius_offset,
            color: config.color,
            opacity: config.opacity.clamp(0.0, 1.0),
        })
    }
}

/// All scenery, updated once per frame after the controller.
pub struct Scenery {
    pub clouds: CloudLayer,
    pub flock: Flock,
    pub moon: Moon,
    pub water: Option<WaterShell>,
}

impl Scenery {
    pub fn new<R: Rng + ?Sized>(config: &SceneryConfig, planet_radius: f32, rng: &mut R) -> Self {
        let clouds = CloudLayer::new(&config.clouds, planet_radius, rng);
        let flock = Flock::new(config.birds.clone(), rng);
        log::debug!(
            "Scenery: {} clouds, {} birds",
            clouds.clouds().len(),
            flock.birds().len()
        );
        Self {
            clouds,
            flock,
            moon: Moon::new(&config.moon, planet_radius),
            water: WaterShell::new(&config.water, planet_radius),
        }
    }

    pub fn update_clouds(&mut self, dt: f32) {
        self.clouds.update(dt);
    }

    pub fn update_birds<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        self.flock.update(dt, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_default_scenery() {
        let mut rng = StdRng::seed_from_u64(2);
        let scenery = Scenery::new(&SceneryConfig::default(), 15.0, &mut rng);
        assert_eq!(scenery.clouds.clouds().len(), 80);
        assert_eq!(scenery.flock.birds().len(), 100);
        let water = scenery.water.unwrap();
        assert_eq!(water.radius, 14.5);
        assert_eq!(water.opacity, 0.7);
    }

    #[test]
    fn test_water_disabled() {
        let config = WaterConfig { enabled: false, ..Default::default() };
        assert!(WaterShell::new(&config, 15.0).is_none());
    }
}
