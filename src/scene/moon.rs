//! Moon with an asynchronously delivered model.

use super::config::MoonConfig;
use crate::core::error::Error;
use crate::core::types::Vec3;
use crate::terrain::sphere_mesh::SphereTopology;

/// Segments of the fallback sphere
const FALLBACK_SEGMENTS: u32 = 32;

/// Triangle mesh for the moon, centered on the origin
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MoonModel {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl MoonModel {
    /// Plain UV sphere of `radius`
    pub fn sphere(radius: f32) -> Self {
        let topology = SphereTopology::new(FALLBACK_SEGMENTS);
        let positions = topology
            .vertices()
            .directions
            .into_iter()
            .map(|d| d * radius)
            .collect();
        Self {
            positions,
            indices: topology.indices().to_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.is_empty()
    }
}

/// What the moon is currently drawn with
#[derive(Clone, Debug, PartialEq)]
pub enum MoonAsset {
    Loaded(MoonModel),
    Fallback { radius: f32 },
}

pub struct Moon {
    asset: MoonAsset,
    position: Vec3,
    color: [f32; 3],
}

impl Moon {
    /// Moon in its fallback form, placed for a planet of `planet_radius`.
    pub fn new(config: &MoonConfig, planet_radius: f32) -> Self {
        let d = planet_radius + config.orbit_offset;
        Self {
            asset: MoonAsset::Fallback { radius: config.radius },
            position: Vec3::new(d, d * 0.5, -d * 0.5),
            color: config.color,
        }
    }

    pub fn asset(&self) -> &MoonAsset {
        &self.asset
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.asset, MoonAsset::Loaded(_))
    }

    /// Accept the result of the model load. A failed or empty load keeps the
    /// fallback sphere.
    pub fn deliver(&mut self, result: Result<MoonModel, Error>) {
        match result {
            Ok(model) if !model.is_empty() => {
                log::info!("Moon model loaded ({} vertices)", model.positions.len());
                self.asset = MoonAsset::Loaded(model);
            }
            Ok(_) => log::warn!("Moon model is empty, keeping fallback sphere"),
            Err(e) => log::warn!("Moon model failed to load, keeping fallback sphere: {e}"),
        }
    }

    /// Geometry to draw right now
    pub fn model(&self) -> MoonModel {
        match &self.asset {
            MoonAsset::Loaded(model) => model.clone(),
            MoonAsset::Fallback { radius } => MoonModel::sphere(*radius),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_and_fallback() {
        let moon = Moon::new(&MoonConfig::default(), 15.0);
        assert_eq!(moon.position(), Vec3::new(95.0, 47.5, -47.5));
        assert_eq!(*moon.asset(), MoonAsset::Fallback { radius: 4.0 });

        let model = moon.model();
        assert_eq!(model.positions.len(), 33 * 33);
        for p in &model.positions {
            assert!((p.length() - 4.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_deliver() {
        let mut moon = Moon::new(&MoonConfig::default(), 15.0);
        moon.deliver(Err(Error::Store("missing asset".into())));
        assert!(!moon.is_loaded());
        moon.deliver(Ok(MoonModel::default()));
        assert!(!moon.is_loaded());

        let model = MoonModel {
            positions: vec![Vec3::X, Vec3::Y, Vec3::Z],
            indices: vec![0, 1, 2],
        };
        moon.deliver(Ok(model.clone()));
        assert_eq!(*moon.asset(), MoonAsset::Loaded(model));
    }
}
