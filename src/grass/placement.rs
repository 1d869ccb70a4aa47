//! Rejection sampling of grass blades over the planet surface.

use rand::Rng;

use super::blade::GrassBlade;
use super::config::GrassConfig;
use super::mesh::GrassMesh;
use crate::core::types::Vec2;
use crate::math::sphere::{sample_uniform_direction, spherical_uv};
use crate::terrain::height::HeightField;
use crate::terrain::mesh::TerrainMesh;

/// Where candidate surface radii come from.
#[derive(Clone, Copy)]
pub enum HeightSource<'a> {
    /// Evaluate the height function directly (fresh terrain).
    Field(&'a HeightField),
    /// Cast against the live mesh (restored or sculpted terrain).
    Mesh(&'a TerrainMesh),
}

/// Displacement range that receives grass. Both ends are inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeBand {
    pub min: f32,
    pub max: f32,
}

impl BiomeBand {
    pub fn from_config(config: &GrassConfig) -> Self {
        Self {
            min: config.min_displacement(),
            max: config.max_displacement(),
        }
    }

    #[inline]
    pub fn contains(&self, displacement: f32) -> bool {
        !(displacement < self.min || displacement > self.max)
    }
}

/// Counters from one placement run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlacementStats {
    pub attempts: usize,
    pub placed: usize,
    pub missed: usize,
    pub out_of_band: usize,
    pub thinned: usize,
}

/// Places blades by drawing area-uniform directions and rejecting those
/// outside the biome band, then thinning the rest at random.
#[derive(Clone, Debug)]
pub struct GrassPlacer {
    config: GrassConfig,
    planet_radius: f32,
    band: BiomeBand,
}

impl GrassPlacer {
    pub fn new(config: GrassConfig, planet_radius: f32) -> Self {
        let band = BiomeBand::from_config(&config);
        Self { config, planet_radius, band }
    }

    pub fn config(&self) -> &GrassConfig {
        &self.config
    }

    pub fn band(&self) -> BiomeBand {
        self.band
    }

    /// Place up to `target` blades within `target * attempt_factor` attempts.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        target: usize,
        source: HeightSource<'_>,
        rng: &mut R,
    ) -> (GrassMesh, PlacementStats) {
        let max_attempts = target.saturating_mul(self.config.attempt_factor);
        let mut mesh = GrassMesh::with_capacity(target);
        let mut stats = PlacementStats::default();

        while stats.placed < target && stats.attempts < max_attempts {
            stats.attempts += 1;
            let sample = sample_uniform_direction(rng);

            let surface_radius = match source {
                HeightSource::Field(field) => self.planet_radius + field.height(sample.theta, sample.phi),
                HeightSource::Mesh(terrain) => match terrain.surface_radius(sample.direction) {
                    Some(r) => r,
                    None => {
                        stats.missed += 1;
                        continue;
                    }
                },
            };

            if !self.band.contains(surface_radius - self.planet_radius) {
                stats.out_of_band += 1;
                continue;
            }
            if rng.gen_range(0.0..1.0f32) > self.config.thinning {
                stats.thinned += 1;
                continue;
            }

            let root = sample.direction * surface_radius;
            let blade = GrassBlade::grow(root, sample.direction, &self.config, rng);
            mesh.push_blade(&blade, Vec2::from_array(spherical_uv(sample.theta, sample.phi)));
            stats.placed += 1;
        }

        (mesh.finish(), stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::config::PlanetConfig;
    use crate::terrain::height::PlanetSeed;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn placer() -> GrassPlacer {
        GrassPlacer::new(GrassConfig::default(), 15.0)
    }

    #[test]
    fn test_band_boundaries_inclusive() {
        let band = placer().band();
        assert!(band.contains(band.min));
        assert!(band.contains(band.max));
        assert!(band.contains(0.0));
        assert!(!band.contains(band.min - 1e-4));
        assert!(!band.contains(band.max + 1e-4));
        assert!((band.min + 0.6).abs() < 1e-6);
        assert!((band.max - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_field_placement_respects_band_and_budget() {
        let planet = PlanetConfig::default();
        let field = HeightField::new(PlanetSeed(42.0), &planet);
        let mut rng = StdRng::seed_from_u64(9);
        let p = placer();

        let (mesh, stats) = p.generate(500, HeightSource::Field(&field), &mut rng);
        assert!(stats.attempts <= 1500);
        assert_eq!(stats.placed, mesh.blade_count());
        assert_eq!(
            stats.attempts,
            stats.placed + stats.missed + stats.out_of_band + stats.thinned
        );
        assert_eq!(stats.missed, 0);
        assert!(stats.placed > 0);

        let band = p.band();
        for blade in mesh.positions().chunks_exact(5) {
            let root = (blade[0] + blade[1]) * 0.5;
            let displacement = root.length() - 15.0;
            assert!(displacement >= band.min - 1e-3 && displacement <= band.max + 1e-3);
        }
    }

    #[test]
    fn test_impossible_band_terminates() {
        let config = GrassConfig { sand_level: 10.0, rock_level: 11.0, ..Default::default() };
        let planet = PlanetConfig::default();
        let field = HeightField::new(PlanetSeed(1.0), &planet);
        let mut rng = StdRng::seed_from_u64(3);

        let (mesh, stats) = GrassPlacer::new(config, 15.0).generate(100, HeightSource::Field(&field), &mut rng);
        assert!(mesh.is_empty());
        assert_eq!(stats.attempts, 300);
        assert_eq!(stats.out_of_band, 300);
    }

    #[test]
    fn test_mesh_placement_sits_on_surface() {
        let planet = PlanetConfig { subdivisions: 16, ..Default::default() };
        let field = HeightField::new(PlanetSeed(5.0), &planet);
        let terrain = TerrainMesh::build(&planet, &field).unwrap();
        let mut rng = StdRng::seed_from_u64(12);

        let (mesh, stats) = placer().generate(50, HeightSource::Mesh(&terrain), &mut rng);
        assert_eq!(stats.missed, 0);
        for blade in mesh.positions().chunks_exact(5) {
            let root = (blade[0] + blade[1]) * 0.5;
            let surface = terrain.surface_radius(root).unwrap();
            assert!((root.length() - surface).abs() < 1e-3);
        }
    }

    #[test]
    fn test_thinning_keeps_about_seventy_percent() {
        let config = GrassConfig { sand_level: -10.0, rock_level: 10.0, ..Default::default() };
        let planet = PlanetConfig::default();
        let field = HeightField::new(PlanetSeed(1.0), &planet);
        let mut rng = StdRng::seed_from_u64(77);

        let (_, stats) = GrassPlacer::new(config, 15.0).generate(2000, HeightSource::Field(&field), &mut rng);
        let in_band = stats.placed + stats.thinned;
        let kept = stats.placed as f32 / in_band as f32;
        assert!((kept - 0.7).abs() < 0.05, "kept {kept}");
    }
}
