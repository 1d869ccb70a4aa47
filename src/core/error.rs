//! Error types for terrainator

use thiserror::Error;

/// Main error type for the planet simulation
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Geometry mismatch: expected {expected} vertex floats, found {found}")]
    GeometryMismatch { expected: usize, found: usize },
}
