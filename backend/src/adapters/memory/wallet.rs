//! Wallet port over the in-memory store.

use async_trait::async_trait;

use super::{newest_first, InMemoryStore};
use crate::domain::foundation::{
    DomainError, ErrorCode, Money, Page, PageRequest, ReviewStatus, UserId, WithdrawalId,
};
use crate::domain::wallet::{LedgerEntry, Posting, Wallet, Withdrawal};
use crate::ports::WalletRepository;

fn already_resolved(id: &WithdrawalId) -> DomainError {
    DomainError::new(
        ErrorCode::InvalidStateTransition,
        format!("Withdrawal {} has already been reviewed", id),
    )
}

#[async_trait]
impl WalletRepository for InMemoryStore {
    async fn find(&self, user_id: &UserId) -> Result<Option<Wallet>, DomainError> {
        Ok(self.state.read().await.wallets.get(user_id).cloned())
    }

    async fn post(&self, posting: &Posting) -> Result<LedgerEntry, DomainError> {
        self.state.write().await.apply_posting(posting)
    }

    async fn recent_entries(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<LedgerEntry>, DomainError> {
        let state = self.state.read().await;
        let mine: Vec<LedgerEntry> = state
            .ledger
            .iter()
            .filter(|e| e.user_id == *user_id)
            .cloned()
            .collect();
        let mut recent = newest_first(&mine, |e| e.created_at);
        recent.truncate(limit as usize);
        Ok(recent)
    }

    async fn list_entries(
        &self,
        user_id: Option<&UserId>,
        page: &PageRequest,
    ) -> Result<Page<LedgerEntry>, DomainError> {
        let state = self.state.read().await;
        let matching: Vec<LedgerEntry> = state
            .ledger
            .iter()
            .filter(|e| user_id.map_or(true, |u| e.user_id == *u))
            .cloned()
            .collect();
        Ok(Page::from_vec(newest_first(&matching, |e| e.created_at), page))
    }

    async fn referral_earnings(&self, user_id: &UserId) -> Result<Money, DomainError> {
        let state = self.state.read().await;
        let cents: i64 = state
            .ledger
            .iter()
            .filter(|e| e.user_id == *user_id && e.category.is_referral_reward())
            .map(|e| e.amount.cents())
            .sum();
        Ok(Money::from_cents(cents)?)
    }

    async fn create_withdrawal(
        &self,
        withdrawal: &Withdrawal,
        debit: &Posting,
    ) -> Result<LedgerEntry, DomainError> {
        let mut state = self.state.write().await;
        let entry = state.apply_posting(debit)?;
        state.withdrawals.push(withdrawal.clone());
        Ok(entry)
    }

    async fn find_withdrawal(&self, id: &WithdrawalId) -> Result<Option<Withdrawal>, DomainError> {
        let state = self.state.read().await;
        Ok(state.withdrawals.iter().find(|w| w.id == *id).cloned())
    }

    async fn list_withdrawals_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Withdrawal>, DomainError> {
        let state = self.state.read().await;
        let mine: Vec<Withdrawal> = state
            .withdrawals
            .iter()
            .filter(|w| w.user_id == *user_id)
            .cloned()
            .collect();
        Ok(newest_first(&mine, |w| w.created_at))
    }

    async fn list_withdrawals(
        &self,
        status: Option<ReviewStatus>,
        page: &PageRequest,
    ) -> Result<Page<Withdrawal>, DomainError> {
        let state = self.state.read().await;
        let matching: Vec<Withdrawal> = state
            .withdrawals
            .iter()
            .filter(|w| status.map_or(true, |s| w.status == s))
            .cloned()
            .collect();
        Ok(Page::from_vec(newest_first(&matching, |w| w.created_at), page))
    }

    async fn resolve_withdrawal(
        &self,
        withdrawal: &Withdrawal,
        reversal: Option<&Posting>,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let index = state
            .withdrawals
            .iter()
            .position(|w| w.id == withdrawal.id && w.status == ReviewStatus::Pending)
            .ok_or_else(|| already_resolved(&withdrawal.id))?;
        if let Some(posting) = reversal {
            state.apply_posting(posting)?;
        }
        state.withdrawals[index] = withdrawal.clone();
        Ok(())
    }
}
