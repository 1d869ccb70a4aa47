//! Frame driver tying the planet, player and scenery together.
//!
//! [`Simulation`] owns every subsystem plus a [`SimulationState`] holding the
//! per-session mutable state (camera, controller, brush, pointer lock). The
//! host calls [`Simulation::start`] once, [`Simulation::tick`] every frame and
//! [`Simulation::shutdown`] before exiting.

use std::path::Path;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::atmosphere::{AtmosphereConfig, AtmosphereSystem};
use crate::audio::{AudioConfig, AudioMixer, AudioSettings};
use crate::core::camera::Camera;
use crate::core::camera_controller::{ControllerConfig, ControllerStep, SurfaceController};
use crate::core::error::Error;
use crate::core::input::FrameInput;
use crate::grass::{GrassConfig, GrassSystem, HeightSource};
use crate::persistence::{
    KeyValueStore, PersistWrites, PersistedCameraState, PersistenceBridge, PersistenceConfig,
};
use crate::render::FrameUniforms;
use crate::scene::{MoonModel, Scenery, SceneryConfig};
use crate::terrain::{
    Brush, BrushCursor, HeightField, PlanetConfig, PlanetSeed, SculptConfig, SculptEngine,
    SculptMode, SculptReport, TerrainMesh, TerrainOrigin,
};

/// Every tunable of a session. Partial JSON files override the defaults.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub planet: PlanetConfig,
    pub sculpt: SculptConfig,
    pub grass: GrassConfig,
    pub controller: ControllerConfig,
    pub persistence: PersistenceConfig,
    pub atmosphere: AtmosphereConfig,
    pub audio: AudioConfig,
    pub audio_settings: AudioSettings,
    pub scenery: SceneryConfig,
    /// Planet seed for a fresh planet. Random when absent; ignored when a
    /// saved planet is restored.
    pub seed: Option<f64>,
}

impl SimulationConfig {
    pub fn from_json(text: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// Startup progress shown by the loading indicator
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    /// Startup failed; the message is shown to the user
    Failed(String),
}

/// Terrain together with the seed and height field it was built from
pub struct Planet {
    pub seed: PlanetSeed,
    pub field: HeightField,
    pub terrain: TerrainMesh,
}

impl Planet {
    pub fn is_restored(&self) -> bool {
        self.terrain.origin() == TerrainOrigin::Restored
    }
}

/// Build the planet for `seed`, restoring `saved` vertices when they fit.
pub fn generate_planet(
    config: &PlanetConfig,
    seed: PlanetSeed,
    saved: Option<&[f32]>,
) -> Result<Planet, Error> {
    let field = HeightField::new(seed, config);
    let terrain = TerrainMesh::build_or_restore(config, &field, saved)?;
    Ok(Planet { seed, field, terrain })
}

/// Mutable per-session state passed between subsystems each frame
pub struct SimulationState {
    pub camera: Camera,
    pub controller: SurfaceController,
    pub brush: Brush,
    /// Mode of the held sculpt button, if any
    pub sculpt_mode: Option<SculptMode>,
    pub pointer_locked: bool,
    /// Seconds since start
    pub elapsed: f32,
    pub cursor: Option<BrushCursor>,
}

impl SimulationState {
    fn new(config: &SimulationConfig) -> Self {
        let mut camera = Camera::default();
        camera.position = config.controller.spawn_position(config.planet.planet_radius);
        Self {
            camera,
            controller: SurfaceController::new(config.controller.clone()),
            brush: Brush::new(&config.sculpt),
            sculpt_mode: None,
            pointer_locked: false,
            elapsed: 0.0,
            cursor: None,
        }
    }

    /// Pose as written to the camera record
    pub fn camera_record(&self) -> PersistedCameraState {
        let (look_theta, look_phi) = self.controller.look_angles();
        PersistedCameraState {
            position: self.camera.position.into(),
            look_theta,
            look_phi,
        }
    }
}

/// What happened during one [`Simulation::tick`]
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameReport {
    pub step: ControllerStep,
    pub sculpted: Option<SculptReport>,
    /// A deferred grass regeneration ran at the start of the frame
    pub grass_regenerated: bool,
    /// A new regeneration was accepted for the next frame
    pub regeneration_requested: bool,
    pub writes: PersistWrites,
}

pub struct Simulation<S: KeyValueStore> {
    config: SimulationConfig,
    status: LoadStatus,
    state: SimulationState,
    planet: Option<Planet>,
    sculpt: SculptEngine,
    grass: GrassSystem,
    persistence: PersistenceBridge<S>,
    atmosphere: AtmosphereSystem,
    audio: AudioMixer,
    scenery: Scenery,
    rng: StdRng,
    frames: u64,
}

impl<S: KeyValueStore> Simulation<S> {
    /// Session with entropy-seeded scenery. With `config.seed` set, the
    /// scenery is seeded from it too.
    pub fn new(config: SimulationConfig, store: S) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.to_bits()),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, store, rng)
    }

    pub fn with_rng(config: SimulationConfig, store: S, mut rng: StdRng) -> Self {
        let radius = config.planet.planet_radius;
        let grass_rng = StdRng::seed_from_u64(rng.next_u64());
        let grass = GrassSystem::with_rng(config.grass.clone(), radius, grass_rng);
        let atmosphere = AtmosphereSystem::new(config.atmosphere.clone(), radius, &mut rng);
        let scenery = Scenery::new(&config.scenery, radius, &mut rng);

        Self {
            status: LoadStatus::Loading,
            state: SimulationState::new(&config),
            planet: None,
            sculpt: SculptEngine::new(&config.sculpt),
            grass,
            persistence: PersistenceBridge::new(store, config.persistence.clone()),
            atmosphere,
            audio: AudioMixer::new(config.audio.clone(), config.audio_settings),
            scenery,
            rng,
            frames: 0,
            config,
        }
    }

    /// Load saved state, build the planet and its grass.
    ///
    /// A generation failure is terminal and reported through the status.
    pub fn start(&mut self) -> &LoadStatus {
        if self.status != LoadStatus::Loading {
            return &self.status;
        }
        let started = Instant::now();
        match self.load_planet() {
            Ok(planet) => {
                let restored = planet.is_restored();
                let source = if restored {
                    HeightSource::Mesh(&planet.terrain)
                } else {
                    HeightSource::Field(&planet.field)
                };
                self.grass.generate_now(source, restored);

                if let Some(pose) = self.persistence.load_camera() {
                    self.state.camera.position = pose.position.into();
                    self.state.controller.set_look_angles(pose.look_theta, pose.look_phi);
                    log::info!("Restored camera at {:?}", self.state.camera.position);
                }

                log::info!(
                    "Planet ready in {:.2?} (seed {:.3}, {})",
                    started.elapsed(),
                    planet.seed.value(),
                    if restored { "restored" } else { "fresh" }
                );
                self.planet = Some(planet);
                self.status = LoadStatus::Ready;
            }
            Err(e) => {
                log::error!("Planet generation failed: {}", e);
                self.status = LoadStatus::Failed(e.to_string());
            }
        }
        &self.status
    }

    fn load_planet(&mut self) -> Result<Planet, Error> {
        let saved = self.persistence.load_terrain();
        let seed = match (&saved, self.config.seed) {
            (Some(record), _) => PlanetSeed(record.seed),
            (None, Some(seed)) => PlanetSeed(seed),
            (None, None) => PlanetSeed::random(&mut self.rng),
        };
        let vertices = saved.as_ref().map(|record| record.vertices.as_slice());
        generate_planet(&self.config.planet, seed, vertices)
    }

    /// Advance one frame of `dt` seconds at wall-clock `now`.
    pub fn tick(&mut self, input: &FrameInput, dt: f32, now: Instant) -> FrameReport {
        let mut report = FrameReport::default();
        let Some(planet) = self.planet.as_mut() else {
            return report;
        };
        let state = &mut self.state;
        self.frames += 1;

        report.grass_regenerated = self.grass.process_pending(&planet.terrain);

        state.pointer_locked = input.pointer_locked;
        state.sculpt_mode = if input.pointer_locked { input.sculpt } else { None };
        if input.interacted {
            self.audio.initialize();
        }

        state.controller.look(input);
        if input.jump && input.pointer_locked {
            state.controller.jump();
        }
        report.step = state.controller.update(&mut state.camera, input, &planet.terrain, dt);

        state.elapsed += dt;
        let blend = self.atmosphere.update(state.camera.position, state.elapsed).blend;

        self.audio.update_ambient(blend, state.pointer_locked);
        self.audio.update_walking(report.step.moving, report.step.grounded);

        self.scenery.update_clouds(dt);
        self.scenery.update_birds(dt, &mut self.rng);

        if state.pointer_locked && input.wheel_delta != 0.0 {
            state.brush.adjust(input.wheel_delta);
        }

        let ray = state.camera.center_ray();
        if let Some(mode) = state.sculpt_mode {
            report.sculpted = self.sculpt.stroke(&mut planet.terrain, &ray, &state.brush, mode);
            if report.sculpted.is_some_and(|r| r.touched > 0) {
                self.persistence.mark_terrain_dirty(now);
            }
        }
        self.audio.update_sculpting(state.sculpt_mode.is_some());

        state.cursor = if state.pointer_locked {
            BrushCursor::locate(&planet.terrain, &ray, &state.brush, state.sculpt_mode)
        } else {
            None
        };

        if input.regenerate_grass {
            report.regeneration_requested = self.grass.request_regeneration();
        }

        report.writes = self.persistence.tick(now, &planet.terrain, planet.seed, &state.camera_record());
        report
    }

    /// Write pending terrain edits and the final pose.
    pub fn shutdown(&mut self) -> Result<bool, Error> {
        let Some(planet) = self.planet.as_ref() else {
            return Ok(false);
        };
        let flushed = self.persistence.flush(&planet.terrain, planet.seed)?;
        self.persistence.save_camera_now(&self.state.camera_record())?;
        log::info!("Shut down after {} frames", self.frames);
        Ok(flushed)
    }

    /// Ask for new grass on the next frame; `false` when one is already pending.
    pub fn request_grass_regeneration(&mut self) -> bool {
        self.grass.request_regeneration()
    }

    /// Hand over the result of the moon model load.
    pub fn deliver_moon(&mut self, result: Result<MoonModel, Error>) {
        self.scenery.moon.deliver(result);
    }

    /// Uniform blocks for the current frame, once the planet exists.
    pub fn uniforms(&self) -> Option<FrameUniforms> {
        let planet = self.planet.as_ref()?;
        Some(FrameUniforms::new(
            &self.state.camera,
            self.atmosphere.state(),
            planet.terrain.planet_radius(),
            self.state.elapsed,
        ))
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn planet(&self) -> Option<&Planet> {
        self.planet.as_ref()
    }

    pub fn grass(&self) -> &GrassSystem {
        &self.grass
    }

    pub fn atmosphere(&self) -> &AtmosphereSystem {
        &self.atmosphere
    }

    pub fn audio(&self) -> &AudioMixer {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioMixer {
        &mut self.audio
    }

    pub fn scenery(&self) -> &Scenery {
        &self.scenery
    }

    pub fn persistence(&self) -> &PersistenceBridge<S> {
        &self.persistence
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
