//! Camera pose, projection and pick rays

use crate::core::types::{Mat3, Mat4, Quat, Vec2, Vec3};
use crate::math::ray::Ray;

/// Camera with position, rotation, and projection parameters
#[derive(Clone, Debug)]
pub struct Camera {
    /// World position
    pub position: Vec3,
    /// Rotation as quaternion
    pub rotation: Quat,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Vec3, fov_y_degrees: f32, aspect: f32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Orient the camera to look along `forward` with `up` as the screen-up hint.
    /// Degenerate inputs leave the rotation unchanged.
    pub fn look_to(&mut self, forward: Vec3, up: Vec3) {
        let forward = forward.normalize_or_zero();
        let right = forward.cross(up).normalize_or_zero();
        if forward == Vec3::ZERO || right == Vec3::ZERO {
            return;
        }
        let up = right.cross(forward);
        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize();
    }

    /// Get view matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        let rotation_matrix = Mat4::from_quat(self.rotation.conjugate());
        let translation_matrix = Mat4::from_translation(-self.position);
        rotation_matrix * translation_matrix
    }

    /// Get projection matrix (camera to clip space)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Get combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get inverse view-projection matrix (for ray generation)
    pub fn view_projection_inverse(&self) -> Mat4 {
        self.view_projection().inverse()
    }

    /// Get forward direction (negative Z in camera space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get right direction (positive X in camera space)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get up direction (positive Y in camera space)
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Ray through the screen center (the crosshair).
    pub fn center_ray(&self) -> Ray {
        Ray::new(self.position, self.forward().normalize())
    }

    /// Ray through normalized device coordinates `ndc` (`[-1, 1]` on both axes).
    pub fn screen_ray(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection_inverse();
        let near = inv.project_point3(ndc.extend(0.0));
        let far = inv.project_point3(ndc.extend(1.0));
        Ray::new(self.position, (far - near).normalize())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5.0), 60.0, 16.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions() {
        let camera = Camera::default();

        // Default camera looks down -Z
        let forward = camera.forward();
        assert!((forward.z - (-1.0)).abs() < 0.001);

        let right = camera.right();
        assert!((right.x - 1.0).abs() < 0.001);

        let up = camera.up();
        assert!((up.y - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_view_matrix_translation() {
        let mut camera = Camera::default();
        camera.position = Vec3::new(10.0, 0.0, 0.0);

        let view = camera.view_matrix();
        // View matrix should translate world origin to (-10, 0, 0) in camera space
        let origin_in_camera = view.transform_point3(Vec3::ZERO);
        assert!((origin_in_camera.x - (-10.0)).abs() < 0.001);
    }

    #[test]
    fn test_look_to() {
        let mut camera = Camera::default();
        camera.look_to(Vec3::X, Vec3::Z);
        assert!((camera.forward() - Vec3::X).length() < 1e-5);
        assert!((camera.up() - Vec3::Z).length() < 1e-5);

        let before = camera.rotation;
        camera.look_to(Vec3::Z, Vec3::Z);
        assert_eq!(camera.rotation, before);
    }

    #[test]
    fn test_center_ray_matches_screen_ray() {
        let mut camera = Camera::new(Vec3::new(0.0, 20.0, 0.0), 60.0, 1.5);
        camera.look_to(Vec3::new(0.3, -1.0, 0.2), Vec3::X);
        let center = camera.center_ray();
        let screen = camera.screen_ray(Vec2::ZERO);
        assert!((center.direction - screen.direction).length() < 1e-3);
        assert_eq!(center.origin, camera.position);
    }

    #[test]
    fn test_screen_ray_edge_tilts_right() {
        let camera = Camera::default();
        let ray = camera.screen_ray(Vec2::new(1.0, 0.0));
        assert!(ray.direction.x > 0.0);
        assert!(ray.direction.z < 0.0);
    }
}
