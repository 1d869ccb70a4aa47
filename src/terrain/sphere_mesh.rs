//! UV-sphere topology with a per-cell triangle index.
//!
//! Vertex `(ix, iy)` sits at `u = ix / w`, `v = iy / h` with direction
//! `(-cos(2πu) sin(πv), cos(πv), sin(2πu) sin(πv))`. The seam column and the
//! pole rows are duplicated, giving `(w + 1) * (h + 1)` vertices. Each grid
//! cell owns up to two triangles; the degenerate one touching a pole is
//! omitted.

use std::f64::consts::{PI, TAU};

use crate::core::types::{Vec2, Vec3};

/// Triangle range of one grid cell: `(first_triangle, count)`
type CellTriangles = (u32, u8);

/// Fixed triangulation of a UV sphere
#[derive(Clone, Debug)]
pub struct SphereTopology {
    width: u32,
    height: u32,
    indices: Vec<u32>,
    cells: Vec<CellTriangles>,
}

/// Unit-sphere positions and texture coordinates for a topology
pub struct SphereVertices {
    pub directions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
}

impl SphereTopology {
    /// Build the triangulation for `segments` width and height segments.
    /// Callers must pass at least 3 segments.
    pub fn new(segments: u32) -> Self {
        let (width, height) = (segments, segments);
        let row = width + 1;
        let vertex = |ix: u32, iy: u32| iy * row + ix;

        let mut indices = Vec::with_capacity((width * height * 6) as usize);
        let mut cells = Vec::with_capacity((width * height) as usize);

        for iy in 0..height {
            for ix in 0..width {
                let a = vertex(ix + 1, iy);
                let b = vertex(ix, iy);
                let c = vertex(ix, iy + 1);
                let d = vertex(ix + 1, iy + 1);

                let first = (indices.len() / 3) as u32;
                let mut count = 0u8;
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                    count += 1;
                }
                if iy != height - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                    count += 1;
                }
                cells.push((first, count));
            }
        }

        Self { width, height, indices, cells }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn vertex_count(&self) -> usize {
        ((self.width + 1) * (self.height + 1)) as usize
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Unit directions and UVs for every vertex, in index order.
    pub fn vertices(&self) -> SphereVertices {
        let count = self.vertex_count();
        let mut directions = Vec::with_capacity(count);
        let mut uvs = Vec::with_capacity(count);

        for iy in 0..=self.height {
            let v = iy as f64 / self.height as f64;
            // Pole vertices are shifted half a cell so each fan triangle samples its own texel column
            let u_offset = if iy == 0 {
                0.5 / self.width as f64
            } else if iy == self.height {
                -0.5 / self.width as f64
            } else {
                0.0
            };

            for ix in 0..=self.width {
                let u = ix as f64 / self.width as f64;
                let (sin_v, cos_v) = (v * PI).sin_cos();
                let (sin_u, cos_u) = (u * TAU).sin_cos();
                directions.push(Vec3::new(
                    (-cos_u * sin_v) as f32,
                    cos_v as f32,
                    (sin_u * sin_v) as f32,
                ));
                uvs.push(Vec2::new((u + u_offset) as f32, (1.0 - v) as f32));
            }
        }

        SphereVertices { directions, uvs }
    }

    /// Grid cell `(ix, iy)` whose parameter rectangle contains `direction`.
    pub fn cell_of(&self, direction: Vec3) -> (u32, u32) {
        let d = direction.as_dvec3().normalize_or_zero();
        let mut u = d.z.atan2(-d.x) / TAU;
        if u < 0.0 {
            u += 1.0;
        }
        let v = d.y.clamp(-1.0, 1.0).acos() / PI;
        let ix = ((u * self.width as f64) as u32).min(self.width - 1);
        let iy = ((v * self.height as f64) as u32).min(self.height - 1);
        (ix, iy)
    }

    /// Triangle indices worth testing for a radial ray through `direction`:
    /// the containing cell and its eight neighbours, or the whole row when the
    /// neighbourhood touches a pole.
    pub fn candidate_triangles(&self, direction: Vec3) -> Vec<u32> {
        let (ix, iy) = self.cell_of(direction);
        let mut out = Vec::with_capacity(18);

        let row_min = iy.saturating_sub(1);
        let row_max = (iy + 1).min(self.height - 1);
        for row in row_min..=row_max {
            if row == 0 || row == self.height - 1 {
                for col in 0..self.width {
                    self.push_cell(col, row, &mut out);
                }
            } else {
                for dx in [self.width - 1, 0, 1] {
                    self.push_cell((ix + dx) % self.width, row, &mut out);
                }
            }
        }
        out
    }

    fn push_cell(&self, ix: u32, iy: u32, out: &mut Vec<u32>) {
        let (first, count) = self.cells[(iy * self.width + ix) as usize];
        out.extend(first..first + count as u32);
    }

    /// Vertex indices of triangle `tri`
    #[inline]
    pub fn triangle(&self, tri: u32) -> [u32; 3] {
        let base = tri as usize * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }
}
