//! JSON records written to the keyed store.

use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;

/// Sculpted terrain: `{ "seed": number, "vertices": number[] }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersistedTerrainState {
    pub seed: f64,
    /// Flat `[x, y, z, ...]` vertex positions
    pub vertices: Vec<f32>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedVec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3> for PersistedVec3 {
    fn from(v: Vec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

impl From<PersistedVec3> for Vec3 {
    fn from(v: PersistedVec3) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

/// Player pose: `{ "position": {x, y, z}, "playerTheta", "playerPhi" }`.
///
/// Records written before look angles were stored omit them; they default to 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedCameraState {
    pub position: PersistedVec3,
    #[serde(rename = "playerTheta", default)]
    pub look_theta: f32,
    #[serde(rename = "playerPhi", default)]
    pub look_phi: f32,
}
