//! Session validation port for bearer tokens.
//!
//! Implementations must verify the token signature, issuer and expiry, and
//! must confirm that the account still exists and is active so that
//! deactivation and role changes take effect on the next request.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and resolves the calling user.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without the `Bearer ` prefix).
    ///
    /// * `Err(AuthError::InvalidToken)` - malformed token or bad signature
    /// * `Err(AuthError::TokenExpired)` - signature valid but expired
    /// * `Err(AuthError::UserNotFound)` - account no longer exists
    /// * `Err(AuthError::AccountDisabled)` - account deactivated
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Role, UserId};
    use std::collections::HashMap;
    use std::sync::RwLock;

    struct TestSessionValidator {
        tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    }

    #[async_trait]
    impl SessionValidator for TestSessionValidator {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            self.tokens
                .read()
                .unwrap()
                .get(token)
                .cloned()
                .ok_or(AuthError::InvalidToken)
        }
    }

    #[tokio::test]
    async fn session_validator_resolves_known_token() {
        let user = AuthenticatedUser::new(UserId::new(), "member@example.com", Role::Member);
        let validator = TestSessionValidator {
            tokens: RwLock::new(HashMap::from([("t-1".to_string(), user.clone())])),
        };

        assert_eq!(validator.validate("t-1").await.unwrap(), user);
        assert_eq!(validator.validate("t-2").await, Err(AuthError::InvalidToken));
    }

    #[test]
    fn session_validator_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionValidator>();
    }
}
