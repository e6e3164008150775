//! Argon2id password hashing.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::domain::foundation::DomainError;
use crate::ports::PasswordHasher;

/// Hashes passwords with Argon2id and a random per-password salt.
///
/// Stored hashes are PHC strings, so parameters travel with the hash.
#[derive(Debug, Default, Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::internal(format!("Password hashing failed: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| DomainError::internal(format!("Stored password hash unreadable: {}", e)))?;
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_original_password_only() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("correct horse").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(hasher.verify("correct horse", &hash).unwrap());
        assert!(!hasher.verify("wrong horse", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let hasher = Argon2PasswordHasher::new();
        assert_ne!(hasher.hash("pa55word").unwrap(), hasher.hash("pa55word").unwrap());
    }

    #[test]
    fn garbage_hash_is_an_error() {
        let hasher = Argon2PasswordHasher::new();
        assert!(hasher.verify("anything", "not-a-phc-string").is_err());
    }
}
