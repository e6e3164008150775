//! EnsureBootstrapAdminHandler - Startup command that guarantees an admin exists.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Email, Role};
use crate::domain::user::{Account, Profile};
use crate::ports::{AccountRepository, NewAccount, PasswordHasher};

#[derive(Debug, Clone)]
pub struct EnsureBootstrapAdminCommand {
    pub email: String,
    pub password: String,
}

/// What startup did with the configured admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Created,
    Promoted,
    AlreadyAdmin,
}

/// Creates the configured admin, or promotes and re-enables an existing
/// account with that email. An existing password is never overwritten.
pub struct EnsureBootstrapAdminHandler {
    accounts: Arc<dyn AccountRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl EnsureBootstrapAdminHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { accounts, hasher }
    }

    pub async fn handle(
        &self,
        cmd: EnsureBootstrapAdminCommand,
    ) -> Result<BootstrapOutcome, DomainError> {
        let email = Email::parse(&cmd.email)?;

        if let Some(mut account) = self.accounts.find_by_email(&email).await? {
            if account.is_admin() && account.is_active {
                return Ok(BootstrapOutcome::AlreadyAdmin);
            }
            account.role = Role::Admin;
            account.is_active = true;
            self.accounts.update(&account).await?;
            tracing::warn!(user_id = %account.id, "bootstrap admin promoted");
            return Ok(BootstrapOutcome::Promoted);
        }

        Account::validate_password(&cmd.password)?;
        let hash = self.hasher.hash(&cmd.password)?;
        let account = Account::register(email, "Administrator", hash, Role::Admin)?;
        self.accounts
            .register(&NewAccount {
                profile: Profile::empty(account.id),
                account: account.clone(),
                referral: None,
            })
            .await?;

        tracing::info!(user_id = %account.id, "bootstrap admin created");
        Ok(BootstrapOutcome::Created)
    }
}
