//! GetWalletHandler - Query handler for balance and recent activity.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{DomainError, Money, UserId};
use crate::domain::wallet::LedgerEntry;
use crate::ports::WalletRepository;

pub const RECENT_ENTRIES: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletView {
    pub user_id: UserId,
    pub balance: Money,
    pub recent_entries: Vec<LedgerEntry>,
}

pub struct GetWalletHandler {
    wallets: Arc<dyn WalletRepository>,
}

impl GetWalletHandler {
    pub fn new(wallets: Arc<dyn WalletRepository>) -> Self {
        Self { wallets }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<WalletView, DomainError> {
        let balance = self
            .wallets
            .find(user_id)
            .await?
            .map(|w| w.balance)
            .unwrap_or(Money::ZERO);
        let recent_entries = self.wallets.recent_entries(user_id, RECENT_ENTRIES).await?;

        Ok(WalletView {
            user_id: *user_id,
            balance,
            recent_entries,
        })
    }
}
