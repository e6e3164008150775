//! ListTransactionsHandler - Query handler for ledger history.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Page, PageRequest, UserId};
use crate::domain::wallet::LedgerEntry;
use crate::ports::WalletRepository;

#[derive(Debug, Clone, Default)]
pub struct ListTransactionsQuery {
    /// `None` lists every wallet (admin ledger).
    pub user_id: Option<UserId>,
    pub page: PageRequest,
}

pub struct ListTransactionsHandler {
    wallets: Arc<dyn WalletRepository>,
}

impl ListTransactionsHandler {
    pub fn new(wallets: Arc<dyn WalletRepository>) -> Self {
        Self { wallets }
    }

    pub async fn handle(
        &self,
        query: ListTransactionsQuery,
    ) -> Result<Page<LedgerEntry>, DomainError> {
        self.wallets
            .list_entries(query.user_id.as_ref(), &query.page)
            .await
    }
}
