//! RequestWithdrawalHandler - Command handler for cashing out a balance.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{DomainError, Money, UserId};
use crate::domain::wallet::{LedgerEntry, Withdrawal};
use crate::ports::WalletRepository;

#[derive(Debug, Clone)]
pub struct RequestWithdrawalCommand {
    pub user_id: UserId,
    pub amount_cents: i64,
    pub destination: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestWithdrawalResult {
    pub withdrawal: Withdrawal,
    pub ledger_entry: LedgerEntry,
}

/// Debits the wallet immediately and records a pending withdrawal.
pub struct RequestWithdrawalHandler {
    wallets: Arc<dyn WalletRepository>,
    minimum: Money,
}

impl RequestWithdrawalHandler {
    pub fn new(wallets: Arc<dyn WalletRepository>, minimum: Money) -> Self {
        Self { wallets, minimum }
    }

    pub async fn handle(
        &self,
        cmd: RequestWithdrawalCommand,
    ) -> Result<RequestWithdrawalResult, DomainError> {
        let balance = self
            .wallets
            .find(&cmd.user_id)
            .await?
            .map(|w| w.balance)
            .unwrap_or(Money::ZERO);

        let (withdrawal, debit) = Withdrawal::request(
            cmd.user_id,
            cmd.amount_cents,
            &cmd.destination,
            self.minimum,
            balance,
        )?;
        // The repository re-checks the balance inside its transaction.
        let ledger_entry = self.wallets.create_withdrawal(&withdrawal, &debit).await?;

        tracing::info!(
            withdrawal_id = %withdrawal.id,
            user_id = %withdrawal.user_id,
            amount = %withdrawal.amount,
            "withdrawal requested"
        );
        Ok(RequestWithdrawalResult {
            withdrawal,
            ledger_entry,
        })
    }
}
