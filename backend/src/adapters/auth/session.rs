//! Session validation backed by signed tokens and the account store.

use std::sync::Arc;

use async_trait::async_trait;

use super::JwtTokenService;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::{AccountRepository, SessionValidator};

/// Verifies the token, then re-loads the account.
///
/// The role and active flag come from the stored account, not the token,
/// so demotions and deactivations apply to tokens already issued.
pub struct AccountSessionValidator {
    tokens: Arc<JwtTokenService>,
    accounts: Arc<dyn AccountRepository>,
}

impl AccountSessionValidator {
    pub fn new(tokens: Arc<JwtTokenService>, accounts: Arc<dyn AccountRepository>) -> Self {
        Self { tokens, accounts }
    }
}

#[async_trait]
impl SessionValidator for AccountSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.tokens.decode(token)?;
        let (user_id, _) = JwtTokenService::identity(&claims)?;

        let account = self
            .accounts
            .find_by_id(&user_id)
            .await
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?
            .ok_or(AuthError::UserNotFound)?;

        if !account.is_active {
            return Err(AuthError::AccountDisabled);
        }

        Ok(account.to_authenticated_user())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::{Email, Role};
    use crate::domain::user::{Account, Profile};
    use crate::ports::{NewAccount, TokenIssuer};

    const SECRET: &[u8] = b"session-test-secret-at-least-32-bytes";

    async fn setup() -> (AccountSessionValidator, Arc<InMemoryStore>, Account) {
        let store = Arc::new(InMemoryStore::new());
        let account = Account::register(
            Email::parse("member@example.com").unwrap(),
            "Member",
            "hash".to_string(),
            Role::Member,
        )
        .unwrap();
        store
            .register(&NewAccount {
                profile: Profile::empty(account.id),
                account: account.clone(),
                referral: None,
            })
            .await
            .unwrap();

        let tokens = Arc::new(JwtTokenService::new(SECRET, "fitpass", 24));
        let validator = AccountSessionValidator::new(tokens, store.clone());
        (validator, store, account)
    }

    #[tokio::test]
    async fn valid_token_resolves_stored_account() {
        let (validator, _, account) = setup().await;
        let token = JwtTokenService::new(SECRET, "fitpass", 24).issue(&account).unwrap();

        let user = validator.validate(&token.access_token).await.unwrap();
        assert_eq!(user.id, account.id);
        assert_eq!(user.role, Role::Member);
    }

    #[tokio::test]
    async fn role_change_applies_to_existing_token() {
        let (validator, store, mut account) = setup().await;
        let token = JwtTokenService::new(SECRET, "fitpass", 24).issue(&account).unwrap();

        account.role = Role::Admin;
        AccountRepository::update(store.as_ref(), &account).await.unwrap();

        let user = validator.validate(&token.access_token).await.unwrap();
        assert!(user.is_admin());
    }

    #[tokio::test]
    async fn deactivated_account_is_rejected() {
        let (validator, store, mut account) = setup().await;
        let token = JwtTokenService::new(SECRET, "fitpass", 24).issue(&account).unwrap();

        account.is_active = false;
        AccountRepository::update(store.as_ref(), &account).await.unwrap();

        assert_eq!(
            validator.validate(&token.access_token).await,
            Err(AuthError::AccountDisabled)
        );
    }

    #[tokio::test]
    async fn unknown_account_is_rejected() {
        let (validator, _, _) = setup().await;
        let stranger = Account::register(
            Email::parse("ghost@example.com").unwrap(),
            "Ghost",
            "hash".to_string(),
            Role::Member,
        )
        .unwrap();
        let token = JwtTokenService::new(SECRET, "fitpass", 24).issue(&stranger).unwrap();

        assert_eq!(
            validator.validate(&token.access_token).await,
            Err(AuthError::UserNotFound)
        );
    }
}
