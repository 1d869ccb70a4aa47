//! Uniform blocks shared with the shaders.
//!
//! WGSL/GLSL `vec3` aligns to 16 bytes, so every `[f32; 3]` is followed by a
//! scalar or explicit padding and every block is a multiple of 16 bytes.

use bytemuck::{Pod, Zeroable};

use crate::atmosphere::{AtmosphereState, hex_rgb};
use crate::core::camera::Camera;
use crate::core::types::Vec3;

/// Ground colour of the terrain shader
pub const GROUND_COLOR: [f32; 3] = hex_rgb(0x8b6914);

/// Lowest displacement at which the grass shader still draws blades
pub const GRASS_MIN_HEIGHT: f32 = -0.6;

/// Camera matrices (160 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view_proj_inv: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub _pos_pad: f32,
    pub near: f32,
    pub far: f32,
    pub _pad: [f32; 2],
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            view_proj_inv: camera.view_projection_inverse().to_cols_array_2d(),
            position: camera.position.to_array(),
            _pos_pad: 0.0,
            near: camera.near,
            far: camera.far,
            _pad: [0.0; 2],
        }
    }
}

/// Terrain shading inputs (32 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GroundUniforms {
    pub planet_center: [f32; 3],
    pub planet_radius: f32,
    pub ground_color: [f32; 3],
    /// Seconds since start
    pub time: f32,
}

impl GroundUniforms {
    pub fn new(planet_radius: f32, time: f32) -> Self {
        Self {
            planet_center: Vec3::ZERO.to_array(),
            planet_radius,
            ground_color: GROUND_COLOR,
            time,
        }
    }
}

/// Grass shading inputs (32 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GrassUniforms {
    pub planet_center: [f32; 3],
    pub grass_min_height: f32,
    pub time: f32,
    pub _pad: [f32; 3],
}

impl GrassUniforms {
    pub fn new(time: f32) -> Self {
        Self {
            planet_center: Vec3::ZERO.to_array(),
            grass_min_height: GRASS_MIN_HEIGHT,
            time,
            _pad: [0.0; 3],
        }
    }
}

/// Sky, star and rim-glow inputs (48 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SkyUniforms {
    pub view_vector: [f32; 3],
    pub star_opacity: f32,
    pub glow_color: [f32; 3],
    pub twinkle_time: f32,
    pub background: [f32; 3],
    pub blend: f32,
}

impl From<&AtmosphereState> for SkyUniforms {
    fn from(state: &AtmosphereState) -> Self {
        Self {
            view_vector: state.view_vector.to_array(),
            star_opacity: state.star_opacity,
            glow_color: state.glow_color,
            twinkle_time: state.twinkle_time,
            background: state.background,
            blend: state.blend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_uniform_sizes() {
        assert_eq!(size_of::<CameraUniform>(), 160);
        assert_eq!(size_of::<GroundUniforms>(), 32);
        assert_eq!(size_of::<GrassUniforms>(), 32);
        assert_eq!(size_of::<SkyUniforms>(), 48);
    }

    #[test]
    fn test_constants() {
        let ground = GroundUniforms::new(15.0, 2.0);
        assert!((ground.ground_color[0] - 139.0 / 255.0).abs() < 1e-6);
        assert_eq!(ground.planet_center, [0.0; 3]);
        assert_eq!(GrassUniforms::new(0.0).grass_min_height, -0.6);
    }
}
