//! Referral read port. Referrals are written by signup and payment approval.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::referral::Referral;

#[async_trait]
pub trait ReferralRepository: Send + Sync {
    /// The referral that brought `user_id` in, if any.
    async fn find_by_referred(&self, user_id: &UserId) -> Result<Option<Referral>, DomainError>;

    /// Referrals made by `user_id`, newest first.
    async fn list_by_referrer(&self, user_id: &UserId) -> Result<Vec<Referral>, DomainError>;
}
