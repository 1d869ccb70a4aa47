//! Terrainator - a walkable miniature planet with real-time terrain sculpting

pub mod core;
pub mod math;
pub mod terrain;
pub mod grass;
pub mod persistence;
pub mod atmosphere;
pub mod audio;
pub mod scene;
pub mod render;
pub mod simulation;
