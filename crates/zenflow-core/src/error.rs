//! Core error types for zenflow-core.
//!
//! Pose classification itself never fails: an unusable frame is a normal
//! `Undetectable` verdict. Errors here cover the edges around it, such as
//! parsing pose names, reading recorded frames, session misuse and config.

use std::path::PathBuf;
use thiserror::Error;

use crate::session::SessionState;

/// Core error type for zenflow-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Pose name did not match any known pose
    #[error("Pose not recognized: '{0}'")]
    UnknownPose(String),

    /// Joint name did not match any known landmark
    #[error("Unknown joint: '{0}'")]
    UnknownJoint(String),

    /// A recorded frame could not be decoded
    #[error("Invalid frame on line {line}: {message}")]
    InvalidFrame { line: usize, message: String },

    /// Session action not allowed in the current state
    #[error("Cannot {action} while session is {from:?}")]
    InvalidTransition {
        from: SessionState,
        action: &'static str,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Dotted key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Home directory could not be resolved or created
    #[error("Configuration directory unavailable: {0}")]
    DirUnavailable(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
