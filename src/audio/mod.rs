//! Gain mixer for the ambient and effect loops.
//!
//! Nothing is played here. The mixer computes one gain per looping channel
//! every frame and the audio collaborator applies them.

pub mod config;

pub use config::{AudioConfig, AudioSettings};

/// Looping channels and their sound assets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioChannel {
    Meadow,
    Space,
    Walking,
    Sculpting,
}

impl AudioChannel {
    pub const ALL: [AudioChannel; 4] = [
        AudioChannel::Meadow,
        AudioChannel::Space,
        AudioChannel::Walking,
        AudioChannel::Sculpting,
    ];

    pub fn asset(self) -> &'static str {
        match self {
            AudioChannel::Meadow => "assets/sounds/meadows-ambient.mp3",
            AudioChannel::Space => "assets/sounds/space.mp3",
            AudioChannel::Walking => "assets/sounds/walking.mp3",
            AudioChannel::Sculpting => "assets/sounds/sand-movement.mp3",
        }
    }
}

/// Current gain per channel, each in `[0, 1]`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AudioGains {
    pub meadow: f32,
    pub space: f32,
    pub walking: f32,
    pub sculpting: f32,
}

impl AudioGains {
    pub fn get(&self, channel: AudioChannel) -> f32 {
        match channel {
            AudioChannel::Meadow => self.meadow,
            AudioChannel::Space => self.space,
            AudioChannel::Walking => self.walking,
            AudioChannel::Sculpting => self.sculpting,
        }
    }
}

/// Crossfades meadow and space ambience by altitude and gates the effect loops.
pub struct AudioMixer {
    config: AudioConfig,
    settings: AudioSettings,
    initialized: bool,
    gains: AudioGains,
    last_blend: f32,
    last_locked: bool,
}

impl AudioMixer {
    pub fn new(config: AudioConfig, settings: AudioSettings) -> Self {
        Self {
            config,
            settings: clamp_settings(settings),
            initialized: false,
            gains: AudioGains::default(),
            last_blend: 0.0,
            last_locked: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn gains(&self) -> &AudioGains {
        &self.gains
    }

    pub fn settings(&self) -> &AudioSettings {
        &self.settings
    }

    /// Start the loops on the first user interaction. Later calls do nothing.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        self.gains = AudioGains {
            meadow: self.config.meadow_max,
            ..Default::default()
        };
        log::info!("Audio mixer initialized");
    }

    pub fn set_ambient_volume(&mut self, volume: f32) {
        self.settings.ambient_volume = clamp_unit(volume);
        self.refresh_ambient();
    }

    pub fn set_effects_volume(&mut self, volume: f32) {
        self.settings.effects_volume = clamp_unit(volume);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.refresh_ambient();
    }

    /// Crossfade ambience for atmosphere blend `t` (0 ground, 1 space).
    pub fn update_ambient(&mut self, t: f32, pointer_locked: bool) {
        self.last_blend = clamp_unit(t);
        self.last_locked = pointer_locked;
        self.refresh_ambient();
    }

    fn refresh_ambient(&mut self) {
        if !self.initialized {
            return;
        }
        let ducking = if self.last_locked { 1.0 } else { self.config.unfocused_ducking };
        let master = if self.settings.muted { 0.0 } else { ducking };
        let ambient = self.settings.ambient_volume * master;
        let t = self.last_blend;
        self.gains.meadow = clamp_unit(self.config.meadow_max * (1.0 - t) * ambient);
        self.gains.space = clamp_unit(self.config.space_max * t * ambient);
    }

    /// Footsteps play only while moving on the ground.
    pub fn update_walking(&mut self, moving: bool, grounded: bool) {
        if !self.initialized {
            return;
        }
        let gain = self.config.walking_volume * self.effects_master();
        self.gains.walking = if moving && grounded { clamp_unit(gain) } else { 0.0 };
    }

    /// Sculpting loop plays while a sculpt button is held.
    pub fn update_sculpting(&mut self, active: bool) {
        if !self.initialized {
            return;
        }
        let gain = self.config.sculpting_volume * self.effects_master();
        self.gains.sculpting = if active { clamp_unit(gain) } else { 0.0 };
    }

    fn effects_master(&self) -> f32 {
        if self.settings.muted { 0.0 } else { self.settings.effects_volume }
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

fn clamp_settings(settings: AudioSettings) -> AudioSettings {
    AudioSettings {
        ambient_volume: clamp_unit(settings.ambient_volume),
        effects_volume: clamp_unit(settings.effects_volume),
        muted: settings.muted,
    }
}
