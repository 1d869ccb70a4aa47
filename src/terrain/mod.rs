//! Spherical planet terrain: height field, mesh and sculpting

pub mod config;
pub mod height;
pub mod sphere_mesh;
pub mod mesh;
pub mod sculpt;

pub use config::{NoiseOctave, PlanetConfig, SculptConfig};
pub use height::{HeightField, PlanetSeed};
pub use mesh::{RayHit, TerrainMesh, TerrainOrigin};
pub use sculpt::{Brush, BrushCursor, SculptEngine, SculptMode, SculptReport};

use crate::core::types::Vec3;

/// Radial surface lookup shared by the controller and grass sampling.
pub trait SurfaceQuery {
    /// Distance from the planet center to the surface under `position`.
    /// Always defined; implementations fall back to the undisplaced radius.
    fn surface_radius_at(&self, position: Vec3) -> f32;
}
