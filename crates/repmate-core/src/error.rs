//! Core error types for repmate-core.
//!
//! Engine commands themselves never fail -- invalid commands for the
//! current phase are silent no-ops. Errors only arise at the I/O boundary:
//! loading plans, reading config, persisting engine state.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for repmate-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Plan-related errors
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Persisted engine state errors
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Workout plan errors.
#[derive(Error, Debug)]
pub enum PlanError {
    /// A plan must contain at least one exercise.
    #[error("Plan contains no exercises")]
    Empty,

    /// Failed to read a plan file
    #[error("Failed to read plan from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse plan JSON
    #[error("Failed to parse plan: {0}")]
    Parse(String),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Persisted engine state errors.
#[derive(Error, Debug)]
pub enum StateError {
    /// Failed to write the state file
    #[error("Failed to write state to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize engine state
    #[error("Failed to serialize state: {0}")]
    Serialize(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
