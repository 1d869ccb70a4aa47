//! Single grass blade built in the local tangent frame of the planet surface.

use std::f32::consts::TAU;

use rand::Rng;

use super::config::GrassConfig;
use crate::core::types::Vec3;
use crate::math::sphere::TangentFrame;

/// Vertices per blade.
pub const BLADE_VERTICES: usize = 5;

/// Triangles of one blade, relative to its own vertex block.
pub const BLADE_TRIANGLES: [[u32; 3]; 3] = [[0, 1, 2], [2, 4, 3], [3, 1, 2]];

/// Vertical shading gradient: base black, mid gray, tip white.
pub const BLADE_COLORS: [[f32; 3]; BLADE_VERTICES] = [
    [0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0],
    [0.5, 0.5, 0.5],
    [0.5, 0.5, 0.5],
    [1.0, 1.0, 1.0],
];

/// Five-vertex blade: two base corners, two mid corners, one tip.
///
/// Vertex order is base-left, base-right, mid-right, mid-left, tip.
#[derive(Clone, Copy, Debug)]
pub struct GrassBlade {
    pub positions: [Vec3; BLADE_VERTICES],
    pub height: f32,
}

impl GrassBlade {
    /// Grow a blade rooted at `root` with `up` as the surface direction.
    ///
    /// Draws, in order: the height variation, a yaw for the footprint and an
    /// independent tip-bend angle.
    pub fn grow<R: Rng + ?Sized>(root: Vec3, up: Vec3, config: &GrassConfig, rng: &mut R) -> Self {
        let frame = TangentFrame::from_up(up);
        let height = config.blade_height + rng.gen_range(0.0..1.0f32) * config.blade_height_variation;
        let yaw = rng.gen_range(0.0..TAU);
        let tip_bend = rng.gen_range(0.0..TAU);

        let half_width = config.blade_width * 0.5;
        let half_mid = config.blade_width * 0.25;
        let across = frame.planar(yaw);
        let tip_dir = frame.planar(tip_bend);
        let up = frame.up;

        let positions = [
            root + across * half_width,
            root - across * half_width,
            root - across * half_mid + up * (height * 0.5),
            root + across * half_mid + up * (height * 0.5),
            root + tip_dir * config.tip_offset + up * height,
        ];

        Self { positions, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_blade_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = GrassConfig::default();
        let up = Vec3::new(0.2, 0.9, -0.3).normalize();
        let root = up * 15.0;

        for _ in 0..50 {
            let blade = GrassBlade::grow(root, up, &config, &mut rng);
            assert!(blade.height >= 0.15 && blade.height <= 0.45);

            let [bl, br, tr, tl, tc] = blade.positions;
            // Base corners sit on the tangent plane, full width apart
            assert!((bl - root).dot(up).abs() < 1e-5);
            assert!(((bl - br).length() - 0.15).abs() < 1e-5);
            // Mid corners at half height, half width apart
            assert!(((tl - root).dot(up) - blade.height * 0.5).abs() < 1e-5);
            assert!(((tl - tr).length() - 0.075).abs() < 1e-5);
            // Tip at full height, bent sideways by the tip offset
            assert!(((tc - root).dot(up) - blade.height).abs() < 1e-5);
            let sideways = (tc - root) - up * blade.height;
            assert!((sideways.length() - 0.05).abs() < 1e-5);
        }
    }

    #[test]
    fn test_blade_at_x_axis_pole() {
        let mut rng = StdRng::seed_from_u64(2);
        let blade = GrassBlade::grow(Vec3::X * 15.0, Vec3::X, &GrassConfig::default(), &mut rng);
        assert!(blade.positions.iter().all(|p| p.is_finite()));
    }
}
