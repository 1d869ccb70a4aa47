//! First-person controller that walks on the surface of the planet

use std::f32::consts::FRAC_PI_3;

use serde::{Deserialize, Serialize};

use crate::core::camera::Camera;
use crate::core::input::FrameInput;
use crate::core::types::{Quat, Vec3};
use crate::terrain::SurfaceQuery;

/// Movement and look tuning
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Eye height above the surface
    pub player_height: f32,
    /// Walking speed in units per second
    pub move_speed: f32,
    /// Radial speed given by a jump
    pub jump_velocity: f32,
    /// Radial acceleration toward the center
    pub gravity: f32,
    /// Radians per pixel of pointer movement
    pub mouse_sensitivity: f32,
    /// Vertical look clamp (radians either side of the horizon)
    pub pitch_limit: f32,
    /// Per-frame blend of the camera up vector toward the surface normal
    pub up_smoothing: f32,
    /// Extra height above the eye height at first spawn
    pub spawn_clearance: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            player_height: 1.0,
            move_speed: 5.0,
            jump_velocity: 8.0,
            gravity: 2.5,
            mouse_sensitivity: 0.002,
            pitch_limit: FRAC_PI_3,
            up_smoothing: 0.1,
            spawn_clearance: 2.0,
        }
    }
}

impl ControllerConfig {
    /// Spawn point above the +Y pole for a planet of `planet_radius`
    pub fn spawn_position(&self, planet_radius: f32) -> Vec3 {
        Vec3::new(0.0, planet_radius + self.player_height + self.spawn_clearance, 0.0)
    }
}

/// Result of one controller update
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControllerStep {
    /// A movement key was held while the pointer was captured
    pub moving: bool,
    /// Standing on the ground (jumps allowed)
    pub grounded: bool,
    /// Distance from the planet center
    pub altitude: f32,
}

/// Walks the camera over a star-shaped surface with "up" pointing away from
/// the planet center.
#[derive(Clone, Debug)]
pub struct SurfaceController {
    config: ControllerConfig,
    /// Horizontal look angle around the local up axis
    look_theta: f32,
    /// Vertical look angle relative to the tangent plane
    look_phi: f32,
    vertical_velocity: f32,
    can_jump: bool,
    /// Smoothed camera up vector
    up: Vec3,
    forward: Vec3,
}

impl SurfaceController {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            look_theta: 0.0,
            look_phi: 0.0,
            vertical_velocity: 0.0,
            can_jump: false,
            up: Vec3::Y,
            forward: Vec3::NEG_Z,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Horizontal and vertical look angles
    pub fn look_angles(&self) -> (f32, f32) {
        (self.look_theta, self.look_phi)
    }

    /// Restore look angles (e.g. from a saved pose); pitch is clamped.
    pub fn set_look_angles(&mut self, theta: f32, phi: f32) {
        self.look_theta = if theta.is_finite() { theta } else { 0.0 };
        let phi = if phi.is_finite() { phi } else { 0.0 };
        self.look_phi = phi.clamp(-self.config.pitch_limit, self.config.pitch_limit);
    }

    pub fn is_grounded(&self) -> bool {
        self.can_jump
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    /// Tangent-plane forward direction from the last update
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Apply pointer movement. Ignored while the pointer is free.
    pub fn look(&mut self, input: &FrameInput) {
        if !input.pointer_locked {
            return;
        }
        let sens = self.config.mouse_sensitivity;
        self.look_theta -= input.look_delta.x * sens;
        self.look_phi -= input.look_delta.y * sens;
        self.look_phi = self.look_phi.clamp(-self.config.pitch_limit, self.config.pitch_limit);
    }

    /// Start a jump when standing on the ground.
    pub fn jump(&mut self) -> bool {
        if !self.can_jump {
            return false;
        }
        self.vertical_velocity = self.config.jump_velocity;
        self.can_jump = false;
        true
    }

    /// Move, fall and orient the camera for one frame.
    ///
    /// Does nothing but report altitude while the pointer is free.
    pub fn update(
        &mut self,
        camera: &mut Camera,
        input: &FrameInput,
        surface: &impl SurfaceQuery,
        dt: f32,
    ) -> ControllerStep {
        if !input.pointer_locked {
            return ControllerStep {
                moving: false,
                grounded: self.can_jump,
                altitude: camera.position.length(),
            };
        }

        let up = camera.position.normalize_or(Vec3::Y);

        let mut reference = Vec3::NEG_Z;
        if up.dot(reference).abs() > 0.99 {
            reference = Vec3::X;
        }
        let tangent = (reference - up * reference.dot(up)).normalize();
        let forward = Quat::from_axis_angle(up, self.look_theta) * tangent;
        let right = forward.cross(up).normalize();

        let keys = input.movement;
        let mut step = Vec3::ZERO;
        if keys.forward {
            step += forward;
        }
        if keys.backward {
            step -= forward;
        }
        if keys.right {
            step += right;
        }
        if keys.left {
            step -= right;
        }
        if step.length_squared() > 0.0 {
            camera.position += step.normalize() * self.config.move_speed * dt;
        }

        self.vertical_velocity -= self.config.gravity * dt;
        camera.position += up * self.vertical_velocity * dt;

        let target_radius = surface.surface_radius_at(camera.position) + self.config.player_height;
        if camera.position.length() < target_radius {
            camera.position = camera.position.normalize_or(up) * target_radius;
            self.vertical_velocity = 0.0;
            self.can_jump = true;
        }

        let surface_up = camera.position.normalize_or(up);
        self.up = up.lerp(surface_up, self.config.up_smoothing).normalize_or(surface_up);
        self.forward = forward;

        let look = Quat::from_axis_angle(right, self.look_phi) * forward;
        camera.look_to(look, self.up);

        ControllerStep {
            moving: keys.any(),
            grounded: self.can_jump,
            altitude: camera.position.length(),
        }
    }
}

impl Default for SurfaceController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}
