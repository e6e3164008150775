//! AdjustWalletHandler - Admin command for manual balance corrections.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::wallet::{Direction, LedgerEntry, Posting};
use crate::ports::{AccountRepository, WalletRepository};

#[derive(Debug, Clone)]
pub struct AdjustWalletCommand {
    pub admin_id: UserId,
    pub user_id: UserId,
    pub direction: Direction,
    pub amount_cents: i64,
    pub description: String,
}

/// Debits can never take the balance below zero.
pub struct AdjustWalletHandler {
    accounts: Arc<dyn AccountRepository>,
    wallets: Arc<dyn WalletRepository>,
}

impl AdjustWalletHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>, wallets: Arc<dyn WalletRepository>) -> Self {
        Self { accounts, wallets }
    }

    pub async fn handle(&self, cmd: AdjustWalletCommand) -> Result<LedgerEntry, DomainError> {
        if self.accounts.find_by_id(&cmd.user_id).await?.is_none() {
            return Err(DomainError::not_found(ErrorCode::UserNotFound, "User not found"));
        }

        let posting =
            Posting::admin_adjustment(cmd.user_id, cmd.direction, cmd.amount_cents, &cmd.description)?;
        let entry = self.wallets.post(&posting).await?;

        tracing::info!(
            admin_id = %cmd.admin_id,
            user_id = %cmd.user_id,
            direction = %entry.direction,
            amount = %entry.amount,
            balance_after = %entry.balance_after,
            "wallet adjusted"
        );
        Ok(entry)
    }
}
