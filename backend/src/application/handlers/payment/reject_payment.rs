//! RejectPaymentHandler - Admin command that declines a payment.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, PaymentId, Timestamp, UserId};
use crate::domain::payment::Payment;
use crate::ports::PaymentRepository;

use super::approve_payment::payment_not_found;

#[derive(Debug, Clone)]
pub struct RejectPaymentCommand {
    pub payment_id: PaymentId,
    pub admin_id: UserId,
    pub reason: String,
}

pub struct RejectPaymentHandler {
    payments: Arc<dyn PaymentRepository>,
}

impl RejectPaymentHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>) -> Self {
        Self { payments }
    }

    pub async fn handle(&self, cmd: RejectPaymentCommand) -> Result<Payment, DomainError> {
        let mut payment = self
            .payments
            .find(&cmd.payment_id)
            .await?
            .ok_or_else(payment_not_found)?;
        payment.reject(cmd.admin_id, &cmd.reason, Timestamp::now())?;
        self.payments.reject(&payment).await?;

        tracing::info!(payment_id = %payment.id, admin_id = %cmd.admin_id, "payment rejected");
        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support;
    use crate::domain::foundation::{ErrorCode, ReviewStatus};

    #[tokio::test]
    async fn rejects_with_reason_once() {
        let store = test_support::store();
        let program = test_support::program(&store, 1000, 2).await;
        let payment = Payment::submit(
            UserId::new(),
            &program,
            1000,
            "REF",
            "https://receipts.example.com/r",
        )
        .unwrap();
        store.submit(&payment).await.unwrap();
        let handler = RejectPaymentHandler::new(store);

        let blank = handler
            .handle(RejectPaymentCommand {
                payment_id: payment.id,
                admin_id: UserId::new(),
                reason: "  ".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(blank.code, ErrorCode::ValidationFailed);

        let cmd = RejectPaymentCommand {
            payment_id: payment.id,
            admin_id: UserId::new(),
            reason: "Receipt is unreadable".to_string(),
        };
        let rejected = handler.handle(cmd.clone()).await.unwrap();
        assert_eq!(rejected.status, ReviewStatus::Rejected);
        assert_eq!(rejected.rejection_reason.as_deref(), Some("Receipt is unreadable"));

        let again = handler.handle(cmd).await.unwrap_err();
        assert_eq!(again.code, ErrorCode::InvalidStateTransition);
    }
}
