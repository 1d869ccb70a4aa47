//! GPU-facing data handed to the rendering collaborator.
//!
//! Nothing here touches a graphics API. Meshes become interleaved vertex
//! slices and per-frame state becomes `#[repr(C)]` uniform blocks.

pub mod vertex;
pub mod uniforms;

pub use vertex::{GrassVertex, TerrainVertex, VertexAttribute};
pub use uniforms::{CameraUniform, GrassUniforms, GroundUniforms, SkyUniforms, GRASS_MIN_HEIGHT, GROUND_COLOR};

use crate::atmosphere::AtmosphereState;
use crate::core::camera::Camera;

/// Every uniform block for one frame
#[derive(Clone, Copy, Debug)]
pub struct FrameUniforms {
    pub camera: CameraUniform,
    pub ground: GroundUniforms,
    pub grass: GrassUniforms,
    pub sky: SkyUniforms,
}

impl FrameUniforms {
    pub fn new(camera: &Camera, atmosphere: &AtmosphereState, planet_radius: f32, time: f32) -> Self {
        Self {
            camera: CameraUniform::from_camera(camera),
            ground: GroundUniforms::new(planet_radius, time),
            grass: GrassUniforms::new(time),
            sky: SkyUniforms::from(atmosphere),
        }
    }
}
