//! Admin command handlers that decide pending withdrawals.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId, WithdrawalId};
use crate::domain::wallet::Withdrawal;
use crate::ports::WalletRepository;

fn withdrawal_not_found() -> DomainError {
    DomainError::not_found(ErrorCode::WithdrawalNotFound, "Withdrawal not found")
}

#[derive(Debug, Clone)]
pub struct ApproveWithdrawalCommand {
    pub withdrawal_id: WithdrawalId,
    pub admin_id: UserId,
}

/// Marks the payout as sent. The funds were debited at request time.
pub struct ApproveWithdrawalHandler {
    wallets: Arc<dyn WalletRepository>,
}

impl ApproveWithdrawalHandler {
    pub fn new(wallets: Arc<dyn WalletRepository>) -> Self {
        Self { wallets }
    }

    pub async fn handle(&self, cmd: ApproveWithdrawalCommand) -> Result<Withdrawal, DomainError> {
        let mut withdrawal = self
            .wallets
            .find_withdrawal(&cmd.withdrawal_id)
            .await?
            .ok_or_else(withdrawal_not_found)?;
        withdrawal.approve(cmd.admin_id, Timestamp::now())?;
        self.wallets.resolve_withdrawal(&withdrawal, None).await?;

        tracing::info!(withdrawal_id = %withdrawal.id, admin_id = %cmd.admin_id, "withdrawal approved");
        Ok(withdrawal)
    }
}

#[derive(Debug, Clone)]
pub struct RejectWithdrawalCommand {
    pub withdrawal_id: WithdrawalId,
    pub admin_id: UserId,
    pub reason: String,
}

/// Declines the payout and credits the amount back to the wallet.
pub struct RejectWithdrawalHandler {
    wallets: Arc<dyn WalletRepository>,
}

impl RejectWithdrawalHandler {
    pub fn new(wallets: Arc<dyn WalletRepository>) -> Self {
        Self { wallets }
    }

    pub async fn handle(&self, cmd: RejectWithdrawalCommand) -> Result<Withdrawal, DomainError> {
        let mut withdrawal = self
            .wallets
            .find_withdrawal(&cmd.withdrawal_id)
            .await?
            .ok_or_else(withdrawal_not_found)?;
        let reversal = withdrawal.reject(cmd.admin_id, &cmd.reason, Timestamp::now())?;
        self.wallets
            .resolve_withdrawal(&withdrawal, Some(&reversal))
            .await?;

        tracing::info!(
            withdrawal_id = %withdrawal.id,
            admin_id = %cmd.admin_id,
            restored = %reversal.amount,
            "withdrawal rejected"
        );
        Ok(withdrawal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::test_support::{self, cents};
    use crate::application::handlers::wallet::{RequestWithdrawalCommand, RequestWithdrawalHandler};
    use crate::domain::foundation::{ReviewStatus, Role};
    use crate::domain::wallet::{Direction, LedgerCategory, Posting};

    async fn pending_withdrawal() -> (Arc<InMemoryStore>, UserId, WithdrawalId) {
        let store = test_support::store();
        let account = test_support::account(&store, "cash@example.com", Role::Member).await;
        store
            .post(&Posting::admin_adjustment(account.id, Direction::Credit, 4000, "seed").unwrap())
            .await
            .unwrap();
        let requested = RequestWithdrawalHandler::new(store.clone(), cents(1000))
            .handle(RequestWithdrawalCommand {
                user_id: account.id,
                amount_cents: 2500,
                destination: "PayPal cash@example.com".to_string(),
            })
            .await
            .unwrap();
        (store, account.id, requested.withdrawal.id)
    }

    #[tokio::test]
    async fn approval_keeps_funds_debited() {
        let (store, user, id) = pending_withdrawal().await;
        let approved = ApproveWithdrawalHandler::new(store.clone())
            .handle(ApproveWithdrawalCommand {
                withdrawal_id: id,
                admin_id: UserId::new(),
            })
            .await
            .unwrap();

        assert_eq!(approved.status, ReviewStatus::Approved);
        assert_eq!(store.find(&user).await.unwrap().unwrap().balance, cents(1500));
    }

    #[tokio::test]
    async fn rejection_restores_funds_with_reversal_entry() {
        let (store, user, id) = pending_withdrawal().await;
        let rejected = RejectWithdrawalHandler::new(store.clone())
            .handle(RejectWithdrawalCommand {
                withdrawal_id: id,
                admin_id: UserId::new(),
                reason: "Destination account closed".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(rejected.status, ReviewStatus::Rejected);
        assert_eq!(store.find(&user).await.unwrap().unwrap().balance, cents(4000));
        let latest = store.recent_entries(&user, 1).await.unwrap();
        assert_eq!(latest[0].category, LedgerCategory::WithdrawalReversal);
        assert_eq!(latest[0].reference_id, Some(*id.as_uuid()));
    }

    #[tokio::test]
    async fn decided_withdrawal_cannot_be_decided_again() {
        let (store, _, id) = pending_withdrawal().await;
        ApproveWithdrawalHandler::new(store.clone())
            .handle(ApproveWithdrawalCommand {
                withdrawal_id: id,
                admin_id: UserId::new(),
            })
            .await
            .unwrap();

        let err = RejectWithdrawalHandler::new(store)
            .handle(RejectWithdrawalCommand {
                withdrawal_id: id,
                admin_id: UserId::new(),
                reason: "changed my mind".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[tokio::test]
    async fn unknown_withdrawal_is_not_found() {
        let err = ApproveWithdrawalHandler::new(test_support::store())
            .handle(ApproveWithdrawalCommand {
                withdrawal_id: WithdrawalId::new(),
                admin_id: UserId::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::WithdrawalNotFound);
    }
}
