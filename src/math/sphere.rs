//! Spherical-coordinate helpers shared by terrain, grass and scenery.
//!
//! Convention: `theta` is the azimuth in `[0, 2π)` measured in the XZ plane
//! from +X toward +Z, `phi` is the polar angle in `[0, π]` from +Y.

use std::f64::consts::{PI, TAU};

use rand::Rng;

use crate::core::types::{DVec3, Vec3};

/// Unit direction for the given azimuth and polar angle (f64 precision).
#[inline]
pub fn direction_from_angles(theta: f64, phi: f64) -> DVec3 {
    let sin_phi = phi.sin();
    DVec3::new(sin_phi * theta.cos(), phi.cos(), sin_phi * theta.sin())
}

/// Azimuth and polar angle of a non-zero vector. Zero maps to the +Y pole.
#[inline]
pub fn angles_from_direction(v: DVec3) -> (f64, f64) {
    let r = v.length();
    if r == 0.0 {
        return (0.0, 0.0);
    }
    let theta = v.z.atan2(v.x);
    let phi = (v.y / r).clamp(-1.0, 1.0).acos();
    (theta, phi)
}

/// Great-circle angle between two directions. Inputs need not be normalized.
///
/// Evaluated in f64 and clamped before `acos`, so identical directions give
/// (near) zero instead of the ~3e-4 rad floor f32 rounding would introduce.
#[inline]
pub fn angular_distance(a: Vec3, b: Vec3) -> f32 {
    let a = a.as_dvec3().normalize_or_zero();
    let b = b.as_dvec3().normalize_or_zero();
    a.dot(b).clamp(-1.0, 1.0).acos() as f32
}

/// A point drawn uniformly by area on the unit sphere.
#[derive(Clone, Copy, Debug)]
pub struct SphereSample {
    pub theta: f64,
    pub phi: f64,
    pub direction: Vec3,
}

/// Area-uniform direction: `theta = U(0, 2π)`, `phi = acos(2U - 1)`.
///
/// Drawing `phi` uniformly instead would crowd samples at the poles.
pub fn sample_uniform_direction<R: Rng + ?Sized>(rng: &mut R) -> SphereSample {
    let theta = rng.gen_range(0.0..TAU);
    let phi = (2.0 * rng.gen_range(0.0..1.0f64) - 1.0).acos();
    SphereSample {
        theta,
        phi,
        direction: direction_from_angles(theta, phi).as_vec3(),
    }
}

/// Orthonormal tangent basis around a surface "up" direction.
#[derive(Clone, Copy, Debug)]
pub struct TangentFrame {
    pub up: Vec3,
    pub tangent: Vec3,
    pub bitangent: Vec3,
}

impl TangentFrame {
    /// Builds the frame by projecting +X (or +Y when `up` is nearly parallel to
    /// +X) onto the tangent plane.
    pub fn from_up(up: Vec3) -> Self {
        let up = up.normalize_or_zero();
        let seed = if up.dot(Vec3::X).abs() > 0.9 { Vec3::Y } else { Vec3::X };
        let tangent = (seed - up * up.dot(seed)).normalize();
        let bitangent = up.cross(tangent).normalize();
        Self { up, tangent, bitangent }
    }

    /// Unit vector in the tangent plane at `angle` from `tangent` toward `bitangent`.
    #[inline]
    pub fn planar(&self, angle: f32) -> Vec3 {
        self.tangent * angle.cos() + self.bitangent * angle.sin()
    }
}

/// Equirectangular texture coordinate for spherical angles.
#[inline]
pub fn spherical_uv(theta: f64, phi: f64) -> [f32; 2] {
    [(theta / TAU) as f32, (phi / PI) as f32]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_direction_round_trip() {
        for &(theta, phi) in &[(0.3, 1.1), (2.0, 0.4), (-1.2, 2.8)] {
            let dir = direction_from_angles(theta, phi);
            assert!((dir.length() - 1.0).abs() < 1e-12);
            let (t2, p2) = angles_from_direction(dir * 7.5);
            assert!((t2 - theta).abs() < 1e-9);
            assert!((p2 - phi).abs() < 1e-9);
        }
    }

    #[test]
    fn test_equator_direction() {
        let dir = direction_from_angles(0.0, std::f64::consts::FRAC_PI_2);
        assert_eq!(dir.x, 1.0);
        assert_eq!(dir.z, 0.0);
        assert!(dir.y.abs() < 1e-15);
    }

    #[test]
    fn test_angular_distance() {
        assert!(angular_distance(Vec3::X, Vec3::X * 3.0) < 1e-6);
        assert!((angular_distance(Vec3::X, Vec3::Y) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!((angular_distance(Vec3::X, Vec3::NEG_X) - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn test_tangent_frame_orthonormal() {
        for up in [Vec3::X, Vec3::Y, Vec3::new(0.3, -0.8, 0.5), Vec3::NEG_X] {
            let frame = TangentFrame::from_up(up);
            assert!(frame.up.dot(frame.tangent).abs() < 1e-5);
            assert!(frame.up.dot(frame.bitangent).abs() < 1e-5);
            assert!(frame.tangent.dot(frame.bitangent).abs() < 1e-5);
            assert!((frame.tangent.length() - 1.0).abs() < 1e-5);
            assert!((frame.bitangent.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_uniform_sampling_cos_phi_is_uniform() {
        let mut rng = StdRng::seed_from_u64(7);
        const N: usize = 100_000;
        const BINS: usize = 10;
        let mut cos_bins = [0usize; BINS];
        let mut phi_bins = [0usize; BINS];

        for _ in 0..N {
            let s = sample_uniform_direction(&mut rng);
            assert!((0.0..=PI).contains(&s.phi));
            let c = s.phi.cos();
            let bin = (((c + 1.0) / 2.0) * BINS as f64) as usize;
            cos_bins[bin.min(BINS - 1)] += 1;
            let pbin = ((s.phi / PI) * BINS as f64) as usize;
            phi_bins[pbin.min(BINS - 1)] += 1;
        }

        // Uniform in cos(phi): every bin near N / BINS (std dev ~95)
        let expected = N / BINS;
        for count in cos_bins {
            assert!(count.abs_diff(expected) < expected / 20, "cos bin {count}");
        }

        // Not uniform in phi itself: polar slices hold ~2.4% of samples
        assert!(phi_bins[0] < expected / 2);
        assert!(phi_bins[BINS - 1] < expected / 2);
        assert!(phi_bins[BINS / 2] > expected);
    }

    #[test]
    fn test_spherical_uv_range() {
        let [u, v] = spherical_uv(PI, PI / 2.0);
        assert!((u - 0.5).abs() < 1e-6);
        assert!((v - 0.5).abs() < 1e-6);
    }
}
