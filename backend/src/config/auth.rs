//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

const MIN_SECRET_LEN: usize = 32;

/// Token signing and bootstrap admin settings
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing key for access tokens
    pub jwt_secret: SecretString,

    /// `iss` claim written to and required on every token
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Access token lifetime in hours
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,

    /// Admin account ensured at startup when both fields are set
    pub bootstrap_admin_email: Option<String>,
    pub bootstrap_admin_password: Option<SecretString>,
}

impl AuthConfig {
    /// Returns the bootstrap admin credentials if configured.
    pub fn bootstrap_admin(&self) -> Option<(&str, &SecretString)> {
        match (&self.bootstrap_admin_email, &self.bootstrap_admin_password) {
            (Some(email), Some(password)) => Some((email.as_str(), password)),
            _ => None,
        }
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.jwt_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if self.jwt_secret.expose_secret().len() < MIN_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort);
        }
        if self.issuer.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ISSUER"));
        }
        if !(1..=720).contains(&self.token_ttl_hours) {
            return Err(ValidationError::InvalidTokenTtl);
        }
        match (&self.bootstrap_admin_email, &self.bootstrap_admin_password) {
            (Some(_), Some(password)) if password.expose_secret().len() < 8 => {
                Err(ValidationError::BootstrapPasswordTooShort)
            }
            (Some(_), None) | (None, Some(_)) => Err(ValidationError::IncompleteBootstrapAdmin),
            _ => Ok(()),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: SecretString::new(String::new()),
            issuer: default_issuer(),
            token_ttl_hours: default_token_ttl_hours(),
            bootstrap_admin_email: None,
            bootstrap_admin_password: None,
        }
    }
}

fn default_issuer() -> String {
    "fitpass".to_string()
}

fn default_token_ttl_hours() -> i64 {
    24
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> AuthConfig {
        AuthConfig {
            jwt_secret: SecretString::new("0123456789abcdef0123456789abcdef".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.issuer, "fitpass");
        assert_eq!(config.token_ttl_hours, 24);
        assert!(config.bootstrap_admin().is_none());
    }

    #[test]
    fn test_validation_missing_secret() {
        assert_eq!(
            AuthConfig::default().validate(),
            Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
        );
    }

    #[test]
    fn test_validation_short_secret() {
        let config = AuthConfig {
            jwt_secret: SecretString::new("short".to_string()),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::JwtSecretTooShort));
    }

    #[test]
    fn test_validation_token_ttl_bounds() {
        let config = AuthConfig {
            token_ttl_hours: 0,
            ..valid()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTokenTtl));
    }

    #[test]
    fn test_bootstrap_admin_requires_both_fields() {
        let config = AuthConfig {
            bootstrap_admin_email: Some("admin@example.com".to_string()),
            ..valid()
        };
        assert_eq!(config.validate(), Err(ValidationError::IncompleteBootstrapAdmin));

        let config = AuthConfig {
            bootstrap_admin_email: Some("admin@example.com".to_string()),
            bootstrap_admin_password: Some(SecretString::new("longenough".to_string())),
            ..valid()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.bootstrap_admin().map(|(e, _)| e), Some("admin@example.com"));
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid().validate().is_ok());
    }
}
