//! HTTP listener settings

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;
const MAX_BODY_LIMIT_KB: usize = 10 * 1024;

/// Where and how the API listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub environment: Environment,

    /// `EnvFilter` directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Forces a log format; otherwise JSON in production, pretty elsewhere
    #[serde(default)]
    pub log_format: Option<LogFormat>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Largest accepted JSON body. Workouts with many exercises are the
    /// biggest payload the API takes.
    #[serde(default = "default_body_limit_kb")]
    pub body_limit_kb: usize,

    /// Comma-separated list; unset or empty allows any origin
    pub cors_origins: Option<String>,
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

/// Log output encoding.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, ValidationError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ValidationError::InvalidSocketAddr)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn log_format(&self) -> LogFormat {
        match (self.log_format, self.environment) {
            (Some(format), _) => format,
            (None, Environment::Production) => LogFormat::Json,
            (None, _) => LogFormat::Pretty,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn body_limit_bytes(&self) -> usize {
        self.body_limit_kb * 1024
    }

    /// Allowed CORS origins, empty entries dropped.
    pub fn cors_origins(&self) -> Vec<&str> {
        self.cors_origins
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        if !(1..=MAX_BODY_LIMIT_KB).contains(&self.body_limit_kb) {
            return Err(ValidationError::InvalidBodyLimit);
        }
        self.bind_addr().map(|_| ())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            log_level: default_log_level(),
            log_format: None,
            request_timeout_secs: default_request_timeout(),
            body_limit_kb: default_body_limit_kb(),
            cors_origins: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info,fitpass=debug,sqlx=warn,tower_http=info".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_body_limit_kb() -> usize {
    256
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_all_interfaces() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.body_limit_bytes(), 256 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn production_logs_json_unless_overridden() {
        let mut config = ServerConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        assert_eq!(config.log_format(), LogFormat::Json);

        config.log_format = Some(LogFormat::Pretty);
        assert_eq!(config.log_format(), LogFormat::Pretty);

        assert_eq!(ServerConfig::default().log_format(), LogFormat::Pretty);
    }

    #[test]
    fn hostnames_are_not_bind_addresses() {
        let config = ServerConfig {
            host: "api.fitpass.local".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidSocketAddr));
    }

    #[test]
    fn cors_origins_skip_blank_entries() {
        let config = ServerConfig {
            cors_origins: Some("https://app.fitpass.io, ,https://admin.fitpass.io,".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.cors_origins(),
            vec!["https://app.fitpass.io", "https://admin.fitpass.io"]
        );
        assert!(ServerConfig::default().cors_origins().is_empty());
    }

    #[test]
    fn out_of_range_limits_are_rejected() {
        let port = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(port.validate(), Err(ValidationError::InvalidPort));

        let timeout = ServerConfig {
            request_timeout_secs: 301,
            ..Default::default()
        };
        assert_eq!(timeout.validate(), Err(ValidationError::InvalidTimeout));

        let body = ServerConfig {
            body_limit_kb: 0,
            ..Default::default()
        };
        assert_eq!(body.validate(), Err(ValidationError::InvalidBodyLimit));
    }
}
