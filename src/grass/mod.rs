//! Procedural grass over the planet surface.
//!
//! Blades are rejection-sampled at area-uniform directions, gated by a
//! displacement band, and packed into one flat mesh. Regeneration is
//! deferred to the next frame and replaces the previous mesh in one step.

pub mod config;
pub mod blade;
pub mod placement;
pub mod mesh;

pub use config::GrassConfig;
pub use blade::GrassBlade;
pub use placement::{BiomeBand, GrassPlacer, HeightSource, PlacementStats};
pub use mesh::GrassMesh;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::terrain::mesh::TerrainMesh;

/// Owns the live grass mesh and the regeneration guard.
pub struct GrassSystem {
    placer: GrassPlacer,
    rng: StdRng,
    mesh: Option<GrassMesh>,
    regenerating: bool,
    generation: u64,
}

impl GrassSystem {
    pub fn new(config: GrassConfig, planet_radius: f32) -> Self {
        Self::with_rng(config, planet_radius, StdRng::from_entropy())
    }

    pub fn with_rng(config: GrassConfig, planet_radius: f32, rng: StdRng) -> Self {
        Self {
            placer: GrassPlacer::new(config, planet_radius),
            rng,
            mesh: None,
            regenerating: false,
            generation: 0,
        }
    }

    pub fn config(&self) -> &GrassConfig {
        self.placer.config()
    }

    /// Current grass mesh, if any has been generated.
    pub fn mesh(&self) -> Option<&GrassMesh> {
        self.mesh.as_ref()
    }

    /// Number of completed generations
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_regenerating(&self) -> bool {
        self.regenerating
    }

    /// Generate immediately and replace the current mesh.
    ///
    /// Restored terrain uses the smaller restored target count.
    pub fn generate_now(&mut self, source: HeightSource<'_>, restored: bool) -> &GrassMesh {
        let config = self.placer.config();
        let target = if restored { config.restored_blade_count } else { config.blade_count };
        let (mesh, stats) = self.placer.generate(target, source, &mut self.rng);
        log::info!(
            "Generated {} grass blades ({} attempts, {} out of band, {} thinned, {} missed)",
            stats.placed,
            stats.attempts,
            stats.out_of_band,
            stats.thinned,
            stats.missed
        );
        self.generation += 1;
        self.mesh.insert(mesh)
    }

    /// Ask for a regeneration on the next [`process_pending`](Self::process_pending).
    ///
    /// Returns `false` and drops the request when one is already pending.
    pub fn request_regeneration(&mut self) -> bool {
        if self.regenerating {
            log::debug!("Grass regeneration already pending, request dropped");
            return false;
        }
        log::info!("Grass regeneration scheduled");
        self.regenerating = true;
        true
    }

    /// Run a pending regeneration against the live terrain.
    /// Returns whether a new mesh was installed.
    pub fn process_pending(&mut self, terrain: &TerrainMesh) -> bool {
        if !self.regenerating {
            return false;
        }
        self.generate_now(HeightSource::Mesh(terrain), true);
        self.regenerating = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::config::PlanetConfig;
    use crate::terrain::height::{HeightField, PlanetSeed};

    fn small_config() -> GrassConfig {
        GrassConfig { blade_count: 200, restored_blade_count: 100, ..Default::default() }
    }

    fn system() -> GrassSystem {
        GrassSystem::with_rng(small_config(), 15.0, StdRng::seed_from_u64(21))
    }

    fn terrain() -> TerrainMesh {
        let planet = PlanetConfig { subdivisions: 16, ..Default::default() };
        let field = HeightField::new(PlanetSeed(8.0), &planet);
        TerrainMesh::build(&planet, &field).unwrap()
    }

    #[test]
    fn test_generate_fresh_and_restored_targets() {
        let planet = PlanetConfig::default();
        let field = HeightField::new(PlanetSeed(8.0), &planet);
        let mut grass = system();
        let fresh = grass.generate_now(HeightSource::Field(&field), false).blade_count();
        assert!(fresh <= 200);
        let restored = grass.generate_now(HeightSource::Field(&field), true).blade_count();
        assert!(restored <= 100);
        assert_eq!(grass.generation(), 2);
    }

    #[test]
    fn test_request_while_pending_is_dropped() {
        let mut grass = system();
        assert!(grass.request_regeneration());
        assert!(!grass.request_regeneration());
        assert!(grass.is_regenerating());

        let terrain = terrain();
        assert!(grass.process_pending(&terrain));
        assert!(!grass.is_regenerating());
        assert_eq!(grass.generation(), 1);

        // Nothing pending: no second run
        assert!(!grass.process_pending(&terrain));
        assert_eq!(grass.generation(), 1);
    }

    #[test]
    fn test_old_mesh_kept_until_replaced() {
        let terrain = terrain();
        let mut grass = system();
        grass.generate_now(HeightSource::Mesh(&terrain), true);
        let before = grass.mesh().map(GrassMesh::blade_count);

        grass.request_regeneration();
        assert_eq!(grass.mesh().map(GrassMesh::blade_count), before);
        grass.process_pending(&terrain);
        assert!(grass.mesh().is_some());
        assert_eq!(grass.generation(), 2);
    }
}
