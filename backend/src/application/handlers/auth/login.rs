//! LoginHandler - Command handler for password login.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Email, ErrorCode};
use crate::ports::{AccountRepository, PasswordHasher, TokenIssuer};

use super::AuthSession;

#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Unknown emails and wrong passwords produce the same error.
pub struct LoginHandler {
    accounts: Arc<dyn AccountRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl LoginHandler {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            accounts,
            hasher,
            tokens,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<AuthSession, DomainError> {
        let invalid = || DomainError::new(ErrorCode::InvalidCredentials, "Invalid email or password");

        let email = Email::parse(&cmd.email).map_err(|_| invalid())?;
        let account = match self.accounts.find_by_email(&email).await? {
            Some(account) => account,
            None => {
                tracing::warn!("login attempt for unknown email");
                return Err(invalid());
            }
        };

        if !self.hasher.verify(&cmd.password, &account.password_hash)? {
            tracing::warn!(user_id = %account.id, "login failed: wrong password");
            return Err(invalid());
        }
        if !account.is_active {
            tracing::warn!(user_id = %account.id, "login refused: account disabled");
            return Err(DomainError::new(ErrorCode::AccountDisabled, "Account is disabled"));
        }

        let token = self.tokens.issue(&account)?;
        tracing::info!(user_id = %account.id, "login succeeded");
        Ok(AuthSession { token, account })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::test_support::{self, FixedIssuer, PlainHasher};
    use crate::domain::foundation::Role;

    fn handler(store: Arc<InMemoryStore>) -> LoginHandler {
        LoginHandler::new(store, Arc::new(PlainHasher), Arc::new(FixedIssuer))
    }

    fn login(email: &str, password: &str) -> LoginCommand {
        LoginCommand {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn correct_credentials_issue_token() {
        let store = test_support::store();
        let account = test_support::account(&store, "runner@example.com", Role::Member).await;

        let session = handler(store)
            .handle(login("Runner@Example.com", "password123"))
            .await
            .unwrap();
        assert_eq!(session.account.id, account.id);
        assert_eq!(session.token.access_token, format!("token-for-{}", account.id));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let store = test_support::store();
        test_support::account(&store, "runner@example.com", Role::Member).await;
        let handler = handler(store);

        let wrong = handler.handle(login("runner@example.com", "nope-nope")).await.unwrap_err();
        let unknown = handler.handle(login("ghost@example.com", "password123")).await.unwrap_err();
        let garbage = handler.handle(login("not an email", "password123")).await.unwrap_err();

        assert_eq!(wrong.code, ErrorCode::InvalidCredentials);
        assert_eq!(unknown.code, ErrorCode::InvalidCredentials);
        assert_eq!(garbage.code, ErrorCode::InvalidCredentials);
        assert_eq!(wrong.message, unknown.message);
    }

    #[tokio::test]
    async fn disabled_account_cannot_log_in() {
        let store = test_support::store();
        let mut account = test_support::account(&store, "runner@example.com", Role::Member).await;
        account.is_active = false;
        store.update(&account).await.unwrap();

        let err = handler(store)
            .handle(login("runner@example.com", "password123"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AccountDisabled);
    }
}
