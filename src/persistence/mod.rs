//! Best-effort persistence of terrain edits and the player pose.
//!
//! Loads never fail: a missing, unreadable or malformed record is logged and
//! reported as absent. Terrain writes are debounced behind a quiet period;
//! the camera record is written on a fixed interval.

pub mod store;
pub mod records;

pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use records::{PersistedCameraState, PersistedTerrainState, PersistedVec3};

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::time::{Debouncer, IntervalTimer};
use crate::terrain::height::PlanetSeed;
use crate::terrain::mesh::TerrainMesh;

/// Store keys and write cadence
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    pub terrain_key: String,
    pub camera_key: String,
    /// Quiet period after the last terrain edit before it is written
    pub debounce_ms: u64,
    /// Camera record write interval
    pub camera_interval_ms: u64,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            terrain_key: "terrainator_sphere_v1".to_string(),
            camera_key: "terrainator_camera_sphere_v1".to_string(),
            debounce_ms: 1000,
            camera_interval_ms: 1000,
        }
    }
}

/// What a [`PersistenceBridge::tick`] wrote
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PersistWrites {
    pub terrain: bool,
    pub camera: bool,
}

/// Connects the simulation to a [`KeyValueStore`].
pub struct PersistenceBridge<S: KeyValueStore> {
    store: S,
    config: PersistenceConfig,
    terrain_debounce: Debouncer,
    camera_timer: IntervalTimer,
}

impl<S: KeyValueStore> PersistenceBridge<S> {
    pub fn new(store: S, config: PersistenceConfig) -> Self {
        let terrain_debounce = Debouncer::new(Duration::from_millis(config.debounce_ms));
        let camera_timer = IntervalTimer::new(Duration::from_millis(config.camera_interval_ms));
        Self {
            store,
            config,
            terrain_debounce,
            camera_timer,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Saved terrain, or `None` when absent or unreadable.
    pub fn load_terrain(&self) -> Option<PersistedTerrainState> {
        self.load(&self.config.terrain_key)
    }

    /// Saved player pose, or `None` when absent or unreadable.
    pub fn load_camera(&self) -> Option<PersistedCameraState> {
        self.load(&self.config.camera_key)
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let text = match self.store.get(key) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) => {
                log::error!("Failed to read {}: {}", key, e);
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                log::error!("Discarding malformed {}: {}", key, e);
                None
            }
        }
    }

    /// Note a terrain edit; the write happens after the quiet period.
    pub fn mark_terrain_dirty(&mut self, now: Instant) {
        self.terrain_debounce.touch(now);
    }

    pub fn terrain_pending(&self) -> bool {
        self.terrain_debounce.is_pending()
    }

    /// Write whatever is due at `now`. Store failures are logged, not returned.
    pub fn tick(
        &mut self,
        now: Instant,
        terrain: &TerrainMesh,
        seed: PlanetSeed,
        camera: &PersistedCameraState,
    ) -> PersistWrites {
        let mut writes = PersistWrites::default();

        if self.terrain_debounce.poll(now) {
            match self.save_terrain_now(terrain, seed) {
                Ok(()) => writes.terrain = true,
                Err(e) => log::error!("Failed to save terrain: {}", e),
            }
        }

        if self.camera_timer.ready(now) {
            match self.save_camera_now(camera) {
                Ok(()) => writes.camera = true,
                Err(e) => log::error!("Failed to save camera: {}", e),
            }
        }

        writes
    }

    /// Write the terrain record immediately.
    pub fn save_terrain_now(&mut self, terrain: &TerrainMesh, seed: PlanetSeed) -> Result<(), Error> {
        let record = PersistedTerrainState {
            seed: seed.value(),
            vertices: terrain.vertex_buffer(),
        };
        let json = serde_json::to_string(&record)?;
        self.store.set(&self.config.terrain_key, &json)?;
        log::info!("Saved terrain ({} floats)", record.vertices.len());
        Ok(())
    }

    pub fn save_camera_now(&mut self, camera: &PersistedCameraState) -> Result<(), Error> {
        let json = serde_json::to_string(camera)?;
        self.store.set(&self.config.camera_key, &json)
    }

    /// Write pending terrain edits without waiting for the quiet period.
    pub fn flush(&mut self, terrain: &TerrainMesh, seed: PlanetSeed) -> Result<bool, Error> {
        if !self.terrain_debounce.is_pending() {
            return Ok(false);
        }
        self.terrain_debounce.clear();
        self.save_terrain_now(terrain, seed)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;
    use crate::terrain::config::PlanetConfig;
    use crate::terrain::height::HeightField;

    fn terrain() -> (TerrainMesh, PlanetSeed) {
        let config = PlanetConfig { subdivisions: 8, ..Default::default() };
        let seed = PlanetSeed(42.0);
        let field = HeightField::new(seed, &config);
        (TerrainMesh::build(&config, &field).unwrap(), seed)
    }

    fn bridge() -> PersistenceBridge<MemoryStore> {
        PersistenceBridge::new(MemoryStore::new(), PersistenceConfig::default())
    }

    /// Store whose reads always fail
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, Error> {
            Err(Error::Store("unavailable".into()))
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), Error> {
            Err(Error::Store("unavailable".into()))
        }
        fn remove(&mut self, _key: &str) -> Result<(), Error> {
            Ok(())
        }
    }

    #[test]
    fn test_empty_store_loads_none() {
        let bridge = bridge();
        assert!(bridge.load_terrain().is_none());
        assert!(bridge.load_camera().is_none());
    }

    #[test]
    fn test_malformed_record_is_absent() {
        let mut store = MemoryStore::new();
        store.set("terrainator_sphere_v1", "{not json").unwrap();
        store.set("terrainator_camera_sphere_v1", r#"{"position": 3}"#).unwrap();
        let bridge = PersistenceBridge::new(store, PersistenceConfig::default());
        assert!(bridge.load_terrain().is_none());
        assert!(bridge.load_camera().is_none());
    }

    #[test]
    fn test_failing_store_is_absent() {
        let mut bridge = PersistenceBridge::new(BrokenStore, PersistenceConfig::default());
        assert!(bridge.load_terrain().is_none());
        let (mesh, seed) = terrain();
        assert!(bridge.save_terrain_now(&mesh, seed).is_err());

        // Tick swallows the failure
        let t0 = Instant::now();
        bridge.mark_terrain_dirty(t0);
        let writes = bridge.tick(t0 + Duration::from_secs(2), &mesh, seed, &PersistedCameraState::default());
        assert!(!writes.terrain);
    }

    #[test]
    fn test_terrain_save_is_debounced() {
        let mut bridge = bridge();
        let (mesh, seed) = terrain();
        let camera = PersistedCameraState::default();
        let t0 = Instant::now();

        // Burst of edits
        for i in 0..10 {
            bridge.mark_terrain_dirty(t0 + Duration::from_millis(i * 100));
        }
        let last = t0 + Duration::from_millis(900);
        assert!(!bridge.tick(last + Duration::from_millis(500), &mesh, seed, &camera).terrain);
        assert!(bridge.tick(last + Duration::from_millis(1000), &mesh, seed, &camera).terrain);
        assert!(!bridge.tick(last + Duration::from_millis(3000), &mesh, seed, &camera).terrain);

        let saved = bridge.load_terrain().unwrap();
        assert_eq!(saved.seed, 42.0);
        assert_eq!(saved.vertices.len(), mesh.expected_float_count());
    }

    #[test]
    fn test_camera_written_every_interval() {
        let mut bridge = bridge();
        let (mesh, seed) = terrain();
        let camera = PersistedCameraState {
            position: Vec3::new(0.0, 18.0, 0.0).into(),
            look_theta: 0.3,
            look_phi: 0.1,
        };
        let t0 = Instant::now();

        let mut writes = 0;
        for frame in 0..=180 {
            let now = t0 + Duration::from_millis(frame * 1000 / 60);
            if bridge.tick(now, &mesh, seed, &camera).camera {
                writes += 1;
            }
        }
        assert_eq!(writes, 3);
        assert_eq!(bridge.load_camera(), Some(camera));
    }

    #[test]
    fn test_flush_writes_pending_only() {
        let mut bridge = bridge();
        let (mesh, seed) = terrain();
        assert!(!bridge.flush(&mesh, seed).unwrap());
        bridge.mark_terrain_dirty(Instant::now());
        assert!(bridge.flush(&mesh, seed).unwrap());
        assert!(!bridge.terrain_pending());
        assert_eq!(bridge.store().write_count(), 1);
    }
}
