//! Admin handlers for browsing and moderating accounts.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{
    DomainError, ErrorCode, Money, Page, PageRequest, Role, UserId,
};
use crate::domain::user::{Account, Profile};
use crate::ports::{AccountRepository, ProfileRepository, WalletRepository};

fn user_not_found() -> DomainError {
    DomainError::not_found(ErrorCode::UserNotFound, "User not found")
}

#[derive(Debug, Clone, Default)]
pub struct ListUsersQuery {
    pub search: Option<String>,
    pub page: PageRequest,
}

pub struct ListUsersHandler {
    accounts: Arc<dyn AccountRepository>,
}

impl ListUsersHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    pub async fn handle(&self, query: ListUsersQuery) -> Result<Page<Account>, DomainError> {
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        self.accounts.search(search, &query.page).await
    }
}

/// Everything the back office shows about one member.
#[derive(Debug, Clone, Serialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub account: Account,
    pub profile: Option<Profile>,
    pub wallet_balance: Money,
}

pub struct GetUserHandler {
    accounts: Arc<dyn AccountRepository>,
    profiles: Arc<dyn ProfileRepository>,
    wallets: Arc<dyn WalletRepository>,
}

impl GetUserHandler {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        profiles: Arc<dyn ProfileRepository>,
        wallets: Arc<dyn WalletRepository>,
    ) -> Self {
        Self {
            accounts,
            profiles,
            wallets,
        }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<UserDetail, DomainError> {
        let account = self
            .accounts
            .find_by_id(user_id)
            .await?
            .ok_or_else(user_not_found)?;
        let profile = self.profiles.find(user_id).await?;
        let wallet_balance = self
            .wallets
            .find(user_id)
            .await?
            .map(|w| w.balance)
            .unwrap_or(Money::ZERO);

        Ok(UserDetail {
            account,
            profile,
            wallet_balance,
        })
    }
}

#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
    pub actor: UserId,
    pub user_id: UserId,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

pub struct UpdateUserHandler {
    accounts: Arc<dyn AccountRepository>,
}

impl UpdateUserHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    pub async fn handle(&self, cmd: UpdateUserCommand) -> Result<Account, DomainError> {
        let mut account = self
            .accounts
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(user_not_found)?;

        account.apply_admin_update(&cmd.actor, cmd.role, cmd.is_active)?;
        self.accounts.update(&account).await?;

        tracing::info!(
            admin_id = %cmd.actor,
            user_id = %account.id,
            role = %account.role,
            is_active = account.is_active,
            "account updated by admin"
        );
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support;

    #[tokio::test]
    async fn search_matches_email_or_name_and_ignores_blank() {
        let store = test_support::store();
        test_support::account(&store, "alice@example.com", Role::Member).await;
        test_support::account(&store, "bob@fit.io", Role::Member).await;
        let handler = ListUsersHandler::new(store);

        let hits = handler
            .handle(ListUsersQuery {
                search: Some("FIT.io".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(hits.total, 1);
        assert_eq!(hits.items[0].email.as_str(), "bob@fit.io");

        let all = handler
            .handle(ListUsersQuery {
                search: Some("   ".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(all.total, 2);
    }

    #[tokio::test]
    async fn detail_includes_profile_and_balance() {
        let store = test_support::store();
        let member = test_support::account(&store, "m@example.com", Role::Member).await;

        let detail = GetUserHandler::new(store.clone(), store.clone(), store.clone())
            .handle(&member.id)
            .await
            .unwrap();
        assert_eq!(detail.account.id, member.id);
        assert!(detail.profile.is_some());
        assert!(detail.wallet_balance.is_zero());

        let err = GetUserHandler::new(store.clone(), store.clone(), store)
            .handle(&UserId::new())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }

    #[tokio::test]
    async fn admin_promotes_and_disables_others_but_not_self() {
        let store = test_support::store();
        let admin = test_support::account(&store, "admin@example.com", Role::Admin).await;
        let member = test_support::account(&store, "m@example.com", Role::Member).await;
        let handler = UpdateUserHandler::new(store.clone());

        let updated = handler
            .handle(UpdateUserCommand {
                actor: admin.id,
                user_id: member.id,
                role: Some(Role::Admin),
                is_active: Some(false),
            })
            .await
            .unwrap();
        assert_eq!(updated.role, Role::Admin);
        assert!(!updated.is_active);

        let err = handler
            .handle(UpdateUserCommand {
                actor: admin.id,
                user_id: admin.id,
                role: None,
                is_active: Some(false),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}
