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
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid host address: {0}")]
    InvalidHost(String),

    #[error("Upload limit must be greater than zero")]
    InvalidUploadLimit,

    #[error("AI timeout must be greater than zero")]
    InvalidAiTimeout,

    #[error("Invalid {0} URL format")]
    InvalidUrl(&'static str),

    #[error("AI model name cannot be empty")]
    EmptyModelName,
}
