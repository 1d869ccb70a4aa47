//! Angular-space vertex sculpting

use super::config::SculptConfig;
use super::mesh::TerrainMesh;
use crate::core::types::Vec3;
use crate::math::ray::Ray;
use crate::math::sphere::angular_distance;

/// What a held sculpt button does to the terrain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SculptMode {
    Raise,
    Lower,
    Flatten,
}

impl SculptMode {
    /// Signed code used by input bindings: raise `1`, lower `-1`, flatten `2`.
    pub fn code(self) -> i32 {
        match self {
            SculptMode::Raise => 1,
            SculptMode::Lower => -1,
            SculptMode::Flatten => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(SculptMode::Raise),
            -1 => Some(SculptMode::Lower),
            2 => Some(SculptMode::Flatten),
            _ => None,
        }
    }

    /// Cursor ring color (linear RGB)
    pub fn cursor_color(self) -> [f32; 3] {
        match self {
            SculptMode::Raise => [0.0, 1.0, 0.0],
            SculptMode::Lower => [1.0, 0x44 as f32 / 255.0, 0x44 as f32 / 255.0],
            SculptMode::Flatten => [1.0, 1.0, 1.0],
        }
    }
}

/// Angular brush radius, clamped to its configured range on every change.
#[derive(Debug, Clone, Copy)]
pub struct Brush {
    radius: f32,
    min_radius: f32,
    max_radius: f32,
    wheel_sensitivity: f32,
}

impl Brush {
    pub fn new(config: &SculptConfig) -> Self {
        Self {
            radius: config.initial_radius.clamp(config.min_radius, config.max_radius),
            min_radius: config.min_radius,
            max_radius: config.max_radius,
            wheel_sensitivity: config.wheel_sensitivity,
        }
    }

    /// Angular radius in radians
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f32) {
        if radius.is_finite() {
            self.radius = radius.clamp(self.min_radius, self.max_radius);
        }
    }

    /// Apply a wheel delta; scrolling down (positive) shrinks the brush.
    pub fn adjust(&mut self, wheel_delta: f32) {
        self.set_radius(self.radius - wheel_delta * self.wheel_sensitivity);
    }
}

/// Outcome of one sculpt application
#[derive(Debug, Clone, Copy)]
pub struct SculptReport {
    /// Surface point under the pick ray
    pub hit: Vec3,
    /// Vertices whose radius was rewritten
    pub touched: usize,
}

/// Applies raise/lower/flatten passes to a terrain mesh.
///
/// Every application visits the whole vertex buffer; only vertices closer
/// than the brush radius (as a great-circle angle from the hit direction)
/// are rewritten.
#[derive(Debug, Clone)]
pub struct SculptEngine {
    strength: f32,
    flatten_offset: f32,
    flatten_rate: f32,
}

impl SculptEngine {
    pub fn new(config: &SculptConfig) -> Self {
        Self {
            strength: config.strength,
            flatten_offset: config.flatten_offset,
            flatten_rate: config.flatten_rate,
        }
    }

    /// Pick the terrain with `ray` and sculpt around the hit.
    /// Returns `None` when the ray misses the planet.
    pub fn stroke(
        &self,
        mesh: &mut TerrainMesh,
        ray: &Ray,
        brush: &Brush,
        mode: SculptMode,
    ) -> Option<SculptReport> {
        let hit = mesh.raycast(ray)?;
        let touched = self.apply_at(mesh, hit.point, brush.radius(), mode);
        log::debug!(
            "Sculpt {:?} at {:?}: r={:.3} touched {} vertices",
            mode,
            hit.point,
            brush.radius(),
            touched
        );
        Some(SculptReport { hit: hit.point, touched })
    }

    /// Sculpt around surface direction `center` with angular radius `radius`.
    pub fn apply_at(&self, mesh: &mut TerrainMesh, center: Vec3, radius: f32, mode: SculptMode) -> usize {
        if !(radius > 0.0 && radius.is_finite()) || !center.is_finite() || center.length_squared() == 0.0 {
            return 0;
        }

        let (min_radius, max_radius) = mesh.radius_bounds();
        let flatten_target = mesh.planet_radius() + self.flatten_offset;

        mesh.displace_radially(|p| {
            let d = angular_distance(center, p);
            if d >= radius {
                return None;
            }
            let current = p.length();
            let new_radius = match mode {
                SculptMode::Flatten => current + (flatten_target - current) * self.flatten_rate,
                SculptMode::Raise | SculptMode::Lower => {
                    let falloff = (1.0 - d / radius).powi(2);
                    let sign = mode.code() as f32;
                    (current + sign * self.strength * falloff).clamp(min_radius, max_radius)
                }
            };
            Some(new_radius)
        })
    }
}

/// Ring drawn on the terrain where the brush would land
#[derive(Debug, Clone, Copy)]
pub struct BrushCursor {
    pub position: Vec3,
    /// Outward surface direction at the hit
    pub normal: Vec3,
    /// World-space ring radius
    pub scale: f32,
    pub color: [f32; 3],
}

impl BrushCursor {
    /// Cursor under `ray`, or `None` when it misses the planet.
    pub fn locate(mesh: &TerrainMesh, ray: &Ray, brush: &Brush, mode: Option<SculptMode>) -> Option<Self> {
        let hit = mesh.raycast(ray)?;
        Some(Self {
            position: hit.point,
            normal: hit.point.normalize_or_zero(),
            scale: brush.radius() * hit.point.length(),
            color: mode.map_or([1.0; 3], SculptMode::cursor_color),
        })
    }
}
