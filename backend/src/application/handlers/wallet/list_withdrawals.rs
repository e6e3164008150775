//! Query handlers for withdrawals.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Page, PageRequest, ReviewStatus, UserId};
use crate::domain::wallet::Withdrawal;
use crate::ports::WalletRepository;

/// The caller's own withdrawals, newest first.
pub struct ListMyWithdrawalsHandler {
    wallets: Arc<dyn WalletRepository>,
}

impl ListMyWithdrawalsHandler {
    pub fn new(wallets: Arc<dyn WalletRepository>) -> Self {
        Self { wallets }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<Vec<Withdrawal>, DomainError> {
        self.wallets.list_withdrawals_for_user(user_id).await
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListWithdrawalsQuery {
    pub status: Option<ReviewStatus>,
    pub page: PageRequest,
}

/// Admin review queue.
pub struct ListWithdrawalsHandler {
    wallets: Arc<dyn WalletRepository>,
}

impl ListWithdrawalsHandler {
    pub fn new(wallets: Arc<dyn WalletRepository>) -> Self {
        Self { wallets }
    }

    pub async fn handle(
        &self,
        query: ListWithdrawalsQuery,
    ) -> Result<Page<Withdrawal>, DomainError> {
        self.wallets.list_withdrawals(query.status, &query.page).await
    }
}
