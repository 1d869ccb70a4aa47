//! Interleaved vertex layouts for the terrain and grass meshes

use std::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};

/// One vertex attribute as the pipeline sees it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader location
    pub location: u32,
    /// Byte offset inside the vertex
    pub offset: usize,
    /// Number of f32 components
    pub components: u32,
}

/// Terrain vertex (32 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl TerrainVertex {
    pub const STRIDE: usize = size_of::<Self>();

    pub const ATTRIBUTES: [VertexAttribute; 3] = [
        VertexAttribute { location: 0, offset: offset_of!(TerrainVertex, position), components: 3 },
        VertexAttribute { location: 1, offset: offset_of!(TerrainVertex, normal), components: 3 },
        VertexAttribute { location: 2, offset: offset_of!(TerrainVertex, uv), components: 2 },
    ];
}

/// Grass vertex with its baked colour (44 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GrassVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    /// Surface UV of the blade root, shared by all five vertices
    pub uv: [f32; 2],
    pub color: [f32; 3],
}

impl GrassVertex {
    pub const STRIDE: usize = size_of::<Self>();

    pub const ATTRIBUTES: [VertexAttribute; 4] = [
        VertexAttribute { location: 0, offset: offset_of!(GrassVertex, position), components: 3 },
        VertexAttribute { location: 1, offset: offset_of!(GrassVertex, normal), components: 3 },
        VertexAttribute { location: 2, offset: offset_of!(GrassVertex, uv), components: 2 },
        VertexAttribute { location: 3, offset: offset_of!(GrassVertex, color), components: 3 },
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_sizes() {
        assert_eq!(TerrainVertex::STRIDE, 32);
        assert_eq!(GrassVertex::STRIDE, 44);
        assert_eq!(GrassVertex::ATTRIBUTES[3].offset, 32);
    }

    #[test]
    fn test_cast_to_bytes() {
        let verts = [TerrainVertex { position: [1.0, 2.0, 3.0], ..Default::default() }; 2];
        let bytes: &[u8] = bytemuck::cast_slice(&verts);
        assert_eq!(bytes.len(), 64);
        let floats: &[f32] = bytemuck::cast_slice(&verts);
        assert_eq!(&floats[8..11], &[1.0, 2.0, 3.0]);
    }
}
