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

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Invalid AI base URL")]
    InvalidAiBaseUrl,

    #[error("AI API key is set but no models are configured")]
    NoModelsConfigured,

    #[error("Temperature must be between 0.0 and 2.0")]
    InvalidTemperature,

    #[error("Per-attempt model timeout must be between 1 and 120 seconds")]
    InvalidAttemptTimeout,

    #[error("Retention must be at least one day")]
    InvalidRetention,

    #[error("Sweep interval must be at least 60 seconds")]
    InvalidSweepInterval,

    #[error("Search result limit must be between 1 and 50")]
    InvalidResultLimit,
}
