//! Wallet and ledger port.
//!
//! Every balance change goes through a posting that writes exactly one
//! ledger entry in the same transaction. Debits never take a balance
//! below zero.

use async_trait::async_trait;

use crate::domain::foundation::{
    DomainError, Money, Page, PageRequest, ReviewStatus, UserId, WithdrawalId,
};
use crate::domain::wallet::{LedgerEntry, Posting, Wallet, Withdrawal};

#[async_trait]
pub trait WalletRepository: Send + Sync {
    async fn find(&self, user_id: &UserId) -> Result<Option<Wallet>, DomainError>;

    /// Apply a single posting.
    ///
    /// # Errors
    ///
    /// - `InsufficientFunds` if a debit exceeds the balance
    /// - `UserNotFound` if the wallet doesn't exist
    async fn post(&self, posting: &Posting) -> Result<LedgerEntry, DomainError>;

    /// Newest first.
    async fn recent_entries(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<LedgerEntry>, DomainError>;

    /// Newest first; all wallets when `user_id` is `None`.
    async fn list_entries(
        &self,
        user_id: Option<&UserId>,
        page: &PageRequest,
    ) -> Result<Page<LedgerEntry>, DomainError>;

    /// Sum of referral bonus and cashback credits.
    async fn referral_earnings(&self, user_id: &UserId) -> Result<Money, DomainError>;

    /// Record a pending withdrawal and apply its debit atomically.
    ///
    /// # Errors
    ///
    /// - `InsufficientFunds` if the balance no longer covers the amount
    async fn create_withdrawal(
        &self,
        withdrawal: &Withdrawal,
        debit: &Posting,
    ) -> Result<LedgerEntry, DomainError>;

    async fn find_withdrawal(&self, id: &WithdrawalId) -> Result<Option<Withdrawal>, DomainError>;

    /// Newest first.
    async fn list_withdrawals_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Withdrawal>, DomainError>;

    async fn list_withdrawals(
        &self,
        status: Option<ReviewStatus>,
        page: &PageRequest,
    ) -> Result<Page<Withdrawal>, DomainError>;

    /// Record an admin decision, applying `reversal` in the same transaction.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the withdrawal is no longer pending
    async fn resolve_withdrawal(
        &self,
        withdrawal: &Withdrawal,
        reversal: Option<&Posting>,
    ) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn WalletRepository) {}
    }
}
