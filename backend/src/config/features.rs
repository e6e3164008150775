//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Accept new account registrations
    #[serde(default = "default_true")]
    pub allow_signup: bool,

    /// Show infrastructure error details in responses (disable in production!)
    #[serde(default)]
    pub verbose_errors: bool,

    /// Install the tracing subscriber at startup
    #[serde(default = "default_true")]
    pub enable_tracing: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            allow_signup: true,
            verbose_errors: false,
            enable_tracing: true,
        }
    }
}

fn default_true() -> bool {
    true
}
