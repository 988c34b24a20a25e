//! Error types for the rover map.
//!
//! Only persistence and configuration can fail. Sensor noise, out-of-range
//! coordinates and unreachable goals are reported as values, never errors.

use thiserror::Error;

use crate::config::ConfigLoadError;

/// Rover map error type
#[derive(Error, Debug)]
pub enum MapError {
    /// File could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot is not valid JSON for the expected layout
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Snapshot parsed but is inconsistent
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigLoadError),
}

/// Result alias for fallible map operations
pub type Result<T> = std::result::Result<T, MapError>;
