//! Flat grass geometry shared by every blade on the planet.

use super::blade::{BLADE_COLORS, BLADE_TRIANGLES, BLADE_VERTICES, GrassBlade};
use crate::core::types::{Vec2, Vec3};
use crate::math::normals::compute_vertex_normals;
use crate::render::vertex::GrassVertex;

/// One mesh for all blades. Built once and replaced wholesale.
#[derive(Clone, Debug, Default)]
pub struct GrassMesh {
    positions: Vec<Vec3>,
    uvs: Vec<Vec2>,
    colors: Vec<[f32; 3]>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
}

impl GrassMesh {
    pub fn with_capacity(blades: usize) -> Self {
        let verts = blades * BLADE_VERTICES;
        Self {
            positions: Vec::with_capacity(verts),
            uvs: Vec::with_capacity(verts),
            colors: Vec::with_capacity(verts),
            normals: Vec::new(),
            indices: Vec::with_capacity(blades * BLADE_TRIANGLES.len() * 3),
        }
    }

    /// Append a blade; all five vertices share `uv`.
    pub fn push_blade(&mut self, blade: &GrassBlade, uv: Vec2) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&blade.positions);
        self.uvs.extend(std::iter::repeat_n(uv, BLADE_VERTICES));
        self.colors.extend_from_slice(&BLADE_COLORS);
        for tri in BLADE_TRIANGLES {
            self.indices.extend(tri.iter().map(|i| base + i));
        }
    }

    /// Compute vertex normals once all blades are in.
    pub fn finish(mut self) -> Self {
        compute_vertex_normals(&self.positions, &self.indices, &mut self.normals);
        self
    }

    pub fn blade_count(&self) -> usize {
        self.positions.len() / BLADE_VERTICES
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Interleaved vertices for upload
    pub fn vertices(&self) -> Vec<GrassVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .zip(&self.colors)
            .map(|(((p, n), uv), color)| GrassVertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: uv.to_array(),
                color: *color,
            })
            .collect()
    }
}
