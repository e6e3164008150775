//! GetCurrentAccountHandler - Query handler for the caller's account.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::Account;
use crate::ports::AccountRepository;

pub struct GetCurrentAccountHandler {
    accounts: Arc<dyn AccountRepository>,
}

impl GetCurrentAccountHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<Account, DomainError> {
        self.accounts
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(ErrorCode::UserNotFound, "User not found"))
    }
}
