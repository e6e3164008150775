//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `FITPASS` prefix and
//! `__` as the nesting separator.
//!
//! # Example
//!
//! ```no_run
//! use fitpass::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod features;
mod rewards;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use rewards::RewardsConfig;
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Token signing and bootstrap admin
    pub auth: AuthConfig,

    /// Referral rewards and withdrawal limits
    #[serde(default)]
    pub rewards: RewardsConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads `FITPASS__*` variables:
    ///
    /// - `FITPASS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `FITPASS__DATABASE__URL=...` -> `database.url = ...`
    /// - `FITPASS__REWARDS__PAYMENT_CASHBACK_PERCENT=15`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FITPASS")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.rewards.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "FITPASS__DATABASE__URL",
        "FITPASS__AUTH__JWT_SECRET",
        "FITPASS__SERVER__PORT",
        "FITPASS__SERVER__ENVIRONMENT",
        "FITPASS__REWARDS__PAYMENT_CASHBACK_PERCENT",
        "FITPASS__FEATURES__ALLOW_SIGNUP",
    ];

    fn set_minimal_env() {
        env::set_var("FITPASS__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var("FITPASS__AUTH__JWT_SECRET", "0123456789abcdef0123456789abcdef");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config should load");
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_apply_to_optional_sections() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.rewards.payment_cashback_percent, 10);
        assert!(config.features.allow_signup);
    }

    #[test]
    fn test_overrides_nested_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("FITPASS__SERVER__PORT", "3000");
        env::set_var("FITPASS__SERVER__ENVIRONMENT", "production");
        env::set_var("FITPASS__REWARDS__PAYMENT_CASHBACK_PERCENT", "25");
        env::set_var("FITPASS__FEATURES__ALLOW_SIGNUP", "false");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert_eq!(config.rewards.payment_cashback_percent, 25);
        assert!(!config.features.allow_signup);
    }

    #[test]
    fn test_missing_database_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("FITPASS__AUTH__JWT_SECRET", "0123456789abcdef0123456789abcdef");
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_err());
    }
}
