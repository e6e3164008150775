//! Query handlers for payments.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Page, PageRequest, ReviewStatus, UserId};
use crate::domain::payment::Payment;
use crate::ports::PaymentRepository;

/// The caller's own payments, newest first.
pub struct ListMyPaymentsHandler {
    payments: Arc<dyn PaymentRepository>,
}

impl ListMyPaymentsHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>) -> Self {
        Self { payments }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<Vec<Payment>, DomainError> {
        self.payments.list_for_user(user_id).await
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListPaymentsQuery {
    pub status: Option<ReviewStatus>,
    pub page: PageRequest,
}

/// Admin review queue.
pub struct ListPaymentsHandler {
    payments: Arc<dyn PaymentRepository>,
}

impl ListPaymentsHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>) -> Self {
        Self { payments }
    }

    pub async fn handle(&self, query: ListPaymentsQuery) -> Result<Page<Payment>, DomainError> {
        self.payments.list(query.status, &query.page).await
    }
}
