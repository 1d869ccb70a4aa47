//! Noise-driven radial displacement on the sphere.

use noise::{NoiseFn, Perlin};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::{NoiseOctave, PlanetConfig};
use crate::core::types::DVec3;
use crate::math::sphere::{angles_from_direction, direction_from_angles};

/// Permutation table seed for the shared gradient noise. The planet seed
/// moves the sample point instead of reshuffling the table.
const PERMUTATION_SEED: u32 = 0;

/// Upper bound (exclusive) for freshly rolled planet seeds
const MAX_RANDOM_SEED: f64 = 1000.0;

/// Scalar chosen once per session that selects which planet the noise produces.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanetSeed(pub f64);

impl PlanetSeed {
    /// Roll a fresh seed in `[0, 1000)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(0.0..MAX_RANDOM_SEED))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Deterministic height function: three octaves of 3D Perlin noise sampled
/// at `direction * noise_scale * frequency + seed`.
///
/// Holds no mutable state, so it is `Sync` and can be sampled from any
/// number of threads at once.
#[derive(Clone, Debug)]
pub struct HeightField {
    seed: PlanetSeed,
    noise: Perlin,
    noise_scale: f64,
    height_scale: f64,
    octaves: [NoiseOctave; 3],
}

impl HeightField {
    pub fn new(seed: PlanetSeed, config: &PlanetConfig) -> Self {
        Self {
            seed,
            noise: Perlin::new(PERMUTATION_SEED),
            noise_scale: config.noise_scale,
            height_scale: config.height_scale,
            octaves: config.octaves,
        }
    }

    pub fn seed(&self) -> PlanetSeed {
        self.seed
    }

    /// Radial displacement at azimuth `theta` and polar angle `phi`.
    pub fn height(&self, theta: f64, phi: f64) -> f32 {
        self.height_at_unit(direction_from_angles(theta, phi))
    }

    /// Radial displacement for an arbitrary (non-zero) direction vector.
    pub fn height_at_direction(&self, direction: DVec3) -> f32 {
        let (theta, phi) = angles_from_direction(direction);
        self.height(theta, phi)
    }

    fn height_at_unit(&self, dir: DVec3) -> f32 {
        let offset = self.seed.0;
        let height: f64 = self
            .octaves
            .iter()
            .map(|octave| {
                let p = dir * (self.noise_scale * octave.frequency) + DVec3::splat(offset);
                self.noise.get([p.x, p.y, p.z]) * self.height_scale * octave.amplitude
            })
            .sum();
        height as f32
    }

    /// Largest displacement magnitude the octaves can produce.
    pub fn max_amplitude(&self) -> f32 {
        let sum: f64 = self.octaves.iter().map(|o| o.amplitude).sum();
        (sum * self.height_scale) as f32
    }
}
