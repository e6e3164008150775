//! Normalized email address.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

const MAX_EMAIL_LEN: usize = 254;

/// Email address, trimmed and lowercased on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let value = raw.trim().to_lowercase();
        if value.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if value.len() > MAX_EMAIL_LEN {
            return Err(ValidationError::invalid_format("email", "too long"));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format("email", "contains whitespace"));
        }

        let (local, domain) = value
            .split_once('@')
            .ok_or_else(|| ValidationError::invalid_format("email", "missing '@'"))?;
        if local.is_empty() || domain.contains('@') {
            return Err(ValidationError::invalid_format("email", "malformed address"));
        }
        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
            return Err(ValidationError::invalid_format("email", "malformed domain"));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Email::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
