//! Password hashing and token issuing ports.
//!
//! Both are synchronous: hashing is CPU-bound and token signing needs no I/O.

use serde::Serialize;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::user::Account;

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing string.
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch; `Err` only for unreadable hashes.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}

/// Bearer token handed to the client after signup or login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_at: Timestamp,
}

/// Issues access tokens for accounts.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, account: &Account) -> Result<IssuedToken, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_ports_are_object_safe() {
        fn _hasher(_h: &dyn PasswordHasher) {}
        fn _issuer(_i: &dyn TokenIssuer) {}
    }
}
