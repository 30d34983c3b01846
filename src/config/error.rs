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

    #[error("API URL must start with http:// or https://")]
    InvalidApiUrl,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Connect timeout exceeds request timeout")]
    ConnectTimeoutExceedsTimeout,

    #[error("Invalid log filter directive")]
    InvalidLogLevel,
}
