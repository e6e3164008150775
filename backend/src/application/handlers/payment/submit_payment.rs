//! SubmitPaymentHandler - Command handler for reporting an off-platform payment.

use std::sync::Arc;

use crate::application::handlers::program::program_not_found;
use crate::domain::foundation::{DomainError, ProgramId, UserId};
use crate::domain::payment::Payment;
use crate::ports::{PaymentRepository, ProgramRepository};

#[derive(Debug, Clone)]
pub struct SubmitPaymentCommand {
    pub user_id: UserId,
    pub program_id: ProgramId,
    pub amount_cents: i64,
    pub reference: String,
    pub receipt_url: String,
}

/// Records a pending payment for admin review.
///
/// At most one pending payment per user and program.
pub struct SubmitPaymentHandler {
    payments: Arc<dyn PaymentRepository>,
    programs: Arc<dyn ProgramRepository>,
}

impl SubmitPaymentHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>, programs: Arc<dyn ProgramRepository>) -> Self {
        Self { payments, programs }
    }

    pub async fn handle(&self, cmd: SubmitPaymentCommand) -> Result<Payment, DomainError> {
        let program = self
            .programs
            .find(&cmd.program_id)
            .await?
            .ok_or_else(program_not_found)?;

        let payment = Payment::submit(
            cmd.user_id,
            &program,
            cmd.amount_cents,
            &cmd.reference,
            &cmd.receipt_url,
        )?;
        self.payments.submit(&payment).await?;

        tracing::info!(
            payment_id = %payment.id,
            user_id = %payment.user_id,
            program_id = %payment.program_id,
            amount = %payment.amount,
            "payment submitted"
        );
        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support;
    use crate::domain::foundation::{ErrorCode, ReviewStatus};

    fn command(user_id: UserId, program_id: ProgramId, amount: i64) -> SubmitPaymentCommand {
        SubmitPaymentCommand {
            user_id,
            program_id,
            amount_cents: amount,
            reference: "TRX-1001".to_string(),
            receipt_url: "https://receipts.example.com/1001.png".to_string(),
        }
    }

    #[tokio::test]
    async fn submits_pending_payment_for_exact_price() {
        let store = test_support::store();
        let program = test_support::program(&store, 2500, 4).await;

        let payment = SubmitPaymentHandler::new(store.clone(), store.clone())
            .handle(command(UserId::new(), program.id, 2500))
            .await
            .unwrap();
        assert_eq!(payment.status, ReviewStatus::Pending);
    }

    #[tokio::test]
    async fn wrong_amount_is_rejected() {
        let store = test_support::store();
        let program = test_support::program(&store, 2500, 4).await;

        let err = SubmitPaymentHandler::new(store.clone(), store.clone())
            .handle(command(UserId::new(), program.id, 2000))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn second_pending_payment_conflicts() {
        let store = test_support::store();
        let program = test_support::program(&store, 2500, 4).await;
        let handler = SubmitPaymentHandler::new(store.clone(), store.clone());
        let user = UserId::new();

        handler.handle(command(user, program.id, 2500)).await.unwrap();
        let err = handler.handle(command(user, program.id, 2500)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn unknown_program_is_not_found() {
        let store = test_support::store();
        let err = SubmitPaymentHandler::new(store.clone(), store)
            .handle(command(UserId::new(), ProgramId::new(), 100))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ProgramNotFound);
    }
}
