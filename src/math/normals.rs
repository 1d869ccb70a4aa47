//! Vertex normal recomputation for indexed triangle meshes.

use crate::core::types::Vec3;

/// Recompute per-vertex normals from the triangle list.
///
/// Face normals are accumulated unnormalized, so larger triangles weigh more,
/// then each vertex normal is normalized. Vertices referenced by no triangle
/// end up with a zero normal.
pub fn compute_vertex_normals(positions: &[Vec3], indices: &[u32], normals: &mut Vec<Vec3>) {
    normals.clear();
    normals.resize(positions.len(), Vec3::ZERO);

    for tri in indices.chunks_exact(3) {
        let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let (a, b, c) = (positions[ia], positions[ib], positions[ic]);
        let face = (c - b).cross(a - b);
        normals[ia] += face;
        normals[ib] += face;
        normals[ic] += face;
    }

    for n in normals.iter_mut() {
        *n = n.normalize_or_zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_triangle_normal() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y];
        let mut normals = Vec::new();
        compute_vertex_normals(&positions, &[0, 1, 2], &mut normals);
        for n in normals {
            assert!((n - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn test_unreferenced_vertex_is_zero() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ONE];
        let mut normals = Vec::new();
        compute_vertex_normals(&positions, &[0, 1, 2], &mut normals);
        assert_eq!(normals.len(), 4);
        assert_eq!(normals[3], Vec3::ZERO);
    }
}
