//! Displaced sphere terrain: build, restore, height queries and radial edits.

use rayon::prelude::*;

use super::SurfaceQuery;
use super::config::PlanetConfig;
use super::height::HeightField;
use super::sphere_mesh::SphereTopology;
use crate::core::error::Error;
use crate::core::types::{Vec2, Vec3};
use crate::math::normals::compute_vertex_normals;
use crate::math::ray::Ray;
use crate::render::vertex::TerrainVertex;

/// Nearest intersection of a ray with the terrain
#[derive(Clone, Copy, Debug)]
pub struct RayHit {
    pub t: f32,
    pub point: Vec3,
    pub triangle: u32,
}

/// How the mesh came to be
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerrainOrigin {
    /// Displaced from the height field
    Generated,
    /// Copied verbatim from persisted vertex data
    Restored,
}

/// Subdivided sphere whose vertices are displaced radially.
///
/// Topology is fixed at creation; edits only rescale vertices along their
/// own direction, so every vertex keeps the direction it was built with and
/// the surface stays star-shaped around the planet center.
pub struct TerrainMesh {
    planet_radius: f32,
    min_radius: f32,
    max_radius: f32,
    topology: SphereTopology,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<Vec2>,
    origin: TerrainOrigin,
    revision: u64,
}

impl TerrainMesh {
    /// Generate a fresh mesh from the height field.
    pub fn build(config: &PlanetConfig, field: &HeightField) -> Result<Self, Error> {
        let mut mesh = Self::base_sphere(config)?;
        let planet_radius = mesh.planet_radius;

        mesh.positions.par_iter_mut().for_each(|p| {
            let old_radius = p.length();
            let height = field.height_at_direction(p.as_dvec3());
            let scale = (planet_radius + height) / old_radius;
            *p *= scale;
        });

        if let Some(bad) = mesh.positions.iter().position(|p| !p.is_finite()) {
            return Err(Error::Generation(format!(
                "non-finite terrain vertex {} (seed {})",
                bad,
                field.seed().value()
            )));
        }

        mesh.origin = TerrainOrigin::Generated;
        mesh.recompute_normals();
        log::info!(
            "Generated terrain: {} vertices, {} triangles, seed {:.3}",
            mesh.vertex_count(),
            mesh.triangle_count(),
            field.seed().value()
        );
        Ok(mesh)
    }

    /// Restore a mesh from a flat `[x, y, z, ...]` vertex buffer, bypassing
    /// the height field. The buffer must hold exactly `3 * vertex_count` floats.
    pub fn restore(config: &PlanetConfig, vertices: &[f32]) -> Result<Self, Error> {
        let mut mesh = Self::base_sphere(config)?;
        let expected = mesh.expected_float_count();
        if vertices.len() != expected {
            return Err(Error::GeometryMismatch {
                expected,
                found: vertices.len(),
            });
        }
        if vertices.iter().any(|v| !v.is_finite()) {
            return Err(Error::Generation("persisted terrain holds non-finite vertices".into()));
        }

        for (dst, src) in mesh.positions.iter_mut().zip(vertices.chunks_exact(3)) {
            *dst = Vec3::from_slice(src);
        }

        mesh.origin = TerrainOrigin::Restored;
        mesh.recompute_normals();
        log::info!("Restored terrain: {} vertices", mesh.vertex_count());
        Ok(mesh)
    }

    /// Restore from `saved` when it matches this topology, otherwise generate.
    ///
    /// A mismatched or unusable buffer is never partially applied; the result
    /// is then identical to [`build`](Self::build).
    pub fn build_or_restore(
        config: &PlanetConfig,
        field: &HeightField,
        saved: Option<&[f32]>,
    ) -> Result<Self, Error> {
        if let Some(vertices) = saved {
            match Self::restore(config, vertices) {
                Ok(mesh) => return Ok(mesh),
                Err(e) => log::warn!("Saved terrain rejected, generating fresh: {}", e),
            }
        }
        Self::build(config, field)
    }

    /// Undisplaced sphere of radius `planet_radius`.
    fn base_sphere(config: &PlanetConfig) -> Result<Self, Error> {
        if config.subdivisions < 3 {
            return Err(Error::Generation(format!(
                "sphere needs at least 3 subdivisions, got {}",
                config.subdivisions
            )));
        }
        if !(config.planet_radius.is_finite() && config.planet_radius > 0.0) {
            return Err(Error::Generation(format!(
                "invalid planet radius {}",
                config.planet_radius
            )));
        }

        let topology = SphereTopology::new(config.subdivisions);
        let verts = topology.vertices();
        let positions = verts
            .directions
            .iter()
            .map(|d| *d * config.planet_radius)
            .collect();

        Ok(Self {
            planet_radius: config.planet_radius,
            min_radius: config.min_radius(),
            max_radius: config.max_radius(),
            topology,
            positions,
            normals: Vec::new(),
            uvs: verts.uvs,
            origin: TerrainOrigin::Generated,
            revision: 0,
        })
    }

    pub fn planet_radius(&self) -> f32 {
        self.planet_radius
    }

    /// Radius clamp applied by additive edits
    pub fn radius_bounds(&self) -> (f32, f32) {
        (self.min_radius, self.max_radius)
    }

    pub fn origin(&self) -> TerrainOrigin {
        self.origin
    }

    /// Incremented on every applied edit
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.topology.triangle_count()
    }

    /// Length of the flat vertex buffer this topology persists to
    pub fn expected_float_count(&self) -> usize {
        self.positions.len() * 3
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    pub fn indices(&self) -> &[u32] {
        self.topology.indices()
    }

    /// Flat copy of the vertex positions in persisted order
    pub fn vertex_buffer(&self) -> Vec<f32> {
        bytemuck::cast_slice::<Vec3, f32>(&self.positions).to_vec()
    }

    /// Interleaved vertices for upload
    pub fn vertices(&self) -> Vec<TerrainVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((p, n), uv)| TerrainVertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: uv.to_array(),
            })
            .collect()
    }

    fn triangle_vertices(&self, tri: u32) -> (Vec3, Vec3, Vec3) {
        let [a, b, c] = self.topology.triangle(tri);
        (
            self.positions[a as usize],
            self.positions[b as usize],
            self.positions[c as usize],
        )
    }

    fn nearest_hit(&self, ray: &Ray, triangles: impl Iterator<Item = u32>) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;
        for tri in triangles {
            let (a, b, c) = self.triangle_vertices(tri);
            if let Some(t) = ray.intersects_triangle(a, b, c) {
                if best.is_none_or(|hit| t < hit.t) {
                    best = Some(RayHit { t, point: ray.at(t), triangle: tri });
                }
            }
        }
        best
    }

    /// Nearest intersection of an arbitrary ray against every triangle.
    pub fn raycast(&self, ray: &Ray) -> Option<RayHit> {
        self.nearest_hit(ray, 0..self.triangle_count() as u32)
    }

    /// Distance from the center to the surface along `direction`, found by a
    /// ray cast inward from twice the planet radius.
    ///
    /// Only the triangles around the direction's grid cell are tested; a full
    /// scan runs if they all miss.
    pub fn surface_radius(&self, direction: Vec3) -> Option<f32> {
        if direction.length_squared() == 0.0 || !direction.is_finite() {
            return None;
        }
        let ray = Ray::toward_center(direction, self.planet_radius * 2.0);
        let candidates = self.topology.candidate_triangles(direction);
        self.nearest_hit(&ray, candidates.into_iter())
            .or_else(|| self.raycast(&ray))
            .map(|hit| hit.point.length())
    }

    /// Rescale vertices along their directions.
    ///
    /// `edit` receives each vertex position and returns its new radius, or
    /// `None` to leave it untouched. Normals are recomputed once afterwards
    /// when anything changed. Returns the number of vertices moved.
    pub fn displace_radially<F>(&mut self, mut edit: F) -> usize
    where
        F: FnMut(Vec3) -> Option<f32>,
    {
        let mut touched = 0;
        for p in self.positions.iter_mut() {
            let current = p.length();
            if current == 0.0 {
                continue;
            }
            if let Some(new_radius) = edit(*p) {
                *p *= new_radius / current;
                touched += 1;
            }
        }

        if touched > 0 {
            self.recompute_normals();
            self.revision += 1;
        }
        touched
    }

    fn recompute_normals(&mut self) {
        compute_vertex_normals(&self.positions, self.topology.indices(), &mut self.normals);
    }
}

impl SurfaceQuery for TerrainMesh {
    /// Falls back to the undisplaced radius when the query misses.
    fn surface_radius_at(&self, position: Vec3) -> f32 {
        self.surface_radius(position).unwrap_or(self.planet_radius)
    }
}
