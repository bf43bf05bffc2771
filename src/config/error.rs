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

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("API timeout must be between 1 and 300 seconds, got {0}")]
    InvalidTimeout(u64),

    #[error("Fetch retries must be at most 5, got {0}")]
    TooManyRetries(u32),

    #[error("Access token must not be blank when set")]
    BlankAccessToken,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
