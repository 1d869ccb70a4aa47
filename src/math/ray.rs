//! Ray type and operations

use crate::core::types::Vec3;

/// Below this determinant a ray is treated as parallel to a triangle
const PARALLEL_EPSILON: f32 = 1e-9;
/// Barycentric slack so rays through shared edges and vertices still hit
const EDGE_EPSILON: f32 = 1e-6;

/// A ray defined by origin and direction
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray (direction should be normalized)
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Ray starting `distance` out along `direction` and pointing back at the origin.
    pub fn toward_center(direction: Vec3, distance: f32) -> Self {
        let dir = direction.normalize_or_zero();
        Self::new(dir * distance, -dir)
    }

    /// Get point along ray at parameter t
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Double-sided Möller–Trumbore ray/triangle intersection.
    /// Returns the ray parameter of the hit if it lies in front of the origin.
    pub fn intersects_triangle(&self, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
        let edge1 = b - a;
        let edge2 = c - a;
        let p = self.direction.cross(edge2);
        let det = edge1.dot(p);
        if det.abs() < PARALLEL_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(-EDGE_EPSILON..=1.0 + EDGE_EPSILON).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = self.direction.dot(q) * inv_det;
        if v < -EDGE_EPSILON || u + v > 1.0 + EDGE_EPSILON {
            return None;
        }

        let t = edge2.dot(q) * inv_det;
        (t > 0.0).then_some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(ray.at(5.0), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_toward_center() {
        let ray = Ray::toward_center(Vec3::new(0.0, 2.0, 0.0), 30.0);
        assert_eq!(ray.origin, Vec3::new(0.0, 30.0, 0.0));
        assert_eq!(ray.direction, Vec3::NEG_Y);
    }

    #[test]
    fn test_triangle_hit() {
        let ray = Ray::new(Vec3::new(0.25, 0.25, 5.0), Vec3::NEG_Z);
        let t = ray.intersects_triangle(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert!((t.unwrap() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_triangle_back_face_hit() {
        let ray = Ray::new(Vec3::new(0.25, 0.25, -5.0), Vec3::Z);
        assert!(ray.intersects_triangle(Vec3::ZERO, Vec3::X, Vec3::Y).is_some());
    }

    #[test]
    fn test_triangle_miss() {
        let ray = Ray::new(Vec3::new(2.0, 2.0, 5.0), Vec3::NEG_Z);
        assert!(ray.intersects_triangle(Vec3::ZERO, Vec3::X, Vec3::Y).is_none());
    }

    #[test]
    fn test_triangle_behind_origin() {
        let ray = Ray::new(Vec3::new(0.25, 0.25, 5.0), Vec3::Z);
        assert!(ray.intersects_triangle(Vec3::ZERO, Vec3::X, Vec3::Y).is_none());
    }

    #[test]
    fn test_triangle_vertex_hit() {
        let ray = Ray::new(Vec3::new(1.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(ray.intersects_triangle(Vec3::ZERO, Vec3::X, Vec3::Y).is_some());
    }
}
