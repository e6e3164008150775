//! Account repository port.
//!
//! Registration is the one write that touches several tables: the account,
//! its empty profile, its zero-balance wallet and, for referred signups,
//! the referral record plus the referrer's bonus posting. Implementations
//! must apply all of it atomically.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Email, Page, PageRequest, UserId};
use crate::domain::referral::{Referral, ReferralCode};
use crate::domain::user::{Account, Profile};
use crate::domain::wallet::Posting;

/// Referral created as part of a signup.
#[derive(Debug, Clone)]
pub struct ReferralGrant {
    pub referral: Referral,
    /// Credit to the referrer; absent when the signup bonus is zero.
    pub signup_bonus: Option<Posting>,
}

/// Everything persisted for a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub account: Account,
    pub profile: Profile,
    pub referral: Option<ReferralGrant>,
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Persist a new account with profile, wallet and optional referral.
    ///
    /// # Errors
    ///
    /// - `EmailTaken` if the email is already registered
    /// - `Conflict` if the generated referral code collides (caller may retry)
    /// - `ReferralInvalid` if the referred user already has a referral
    /// - `DatabaseError` on persistence failure
    async fn register(&self, new: &NewAccount) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, DomainError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, DomainError>;

    async fn find_by_referral_code(
        &self,
        code: &ReferralCode,
    ) -> Result<Option<Account>, DomainError>;

    /// Load several accounts at once; unknown ids are skipped.
    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<Account>, DomainError>;

    /// Persist changes to role, active flag and display name.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the account doesn't exist
    async fn update(&self, account: &Account) -> Result<(), DomainError>;

    /// Newest first, optionally filtered by a case-insensitive substring of
    /// email or display name.
    async fn search(
        &self,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<Page<Account>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn AccountRepository) {}
    }
}
