//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Idle timeout must be between 1 and 3600 seconds")]
    InvalidIdleTimeout,

    #[error("Note service request timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("Invalid note service URL format")]
    InvalidNoteServiceUrl,

    #[error("Default tag must not contain whitespace or '#'")]
    InvalidDefaultTag,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),
}
