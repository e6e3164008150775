//! Referral codes.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

pub const CODE_LENGTH: usize = 8;

/// Uppercase letters and digits without the look-alikes 0/O and 1/I/L.
const ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Shareable code identifying the referring account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferralCode(String);

impl ReferralCode {
    /// Generates a random code. Uniqueness is enforced by the store.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let code = (0..CODE_LENGTH)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        Self(code)
    }

    /// Parses user input; case-insensitive and whitespace-tolerant.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let code = raw.trim().to_uppercase();
        if code.is_empty() {
            return Err(ValidationError::empty_field("referral_code"));
        }
        if code.chars().count() != CODE_LENGTH || !code.bytes().all(|b| ALPHABET.contains(&b)) {
            return Err(ValidationError::invalid_format(
                "referral_code",
                format!("must be {} characters from the referral alphabet", CODE_LENGTH),
            ));
        }
        Ok(Self(code))
    }

    /// Wraps a value loaded from storage without re-validating it.
    pub fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferralCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
