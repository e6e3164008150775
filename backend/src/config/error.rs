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

    #[error("Invalid host/port combination")]
    InvalidSocketAddr,

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Request timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("Body limit must be between 1 KiB and 10 MiB")]
    InvalidBodyLimit,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("JWT secret must be at least 32 bytes")]
    JwtSecretTooShort,

    #[error("Token lifetime must be between 1 and 720 hours")]
    InvalidTokenTtl,

    #[error("Bootstrap admin email and password must be set together")]
    IncompleteBootstrapAdmin,

    #[error("Bootstrap admin password must be at least 8 characters")]
    BootstrapPasswordTooShort,

    #[error("Reward amounts cannot be negative")]
    NegativeReward,

    #[error("Cashback percent must be between 0 and 100")]
    InvalidCashbackPercent,
}
