//! ApprovePaymentHandler - Admin command that grants access for a payment.

use std::sync::Arc;

use serde::Serialize;

use crate::application::handlers::program::program_not_found;
use crate::domain::foundation::{DomainError, ErrorCode, Money, PaymentId, Timestamp, UserId};
use crate::domain::payment::Payment;
use crate::domain::program::Enrollment;
use crate::domain::referral::Referral;
use crate::domain::wallet::{LedgerCategory, Posting};
use crate::ports::{
    CashbackSettlement, EnrollmentReader, PaymentApproval, PaymentRepository, ProgramRepository,
    ReferralRepository,
};

pub(crate) fn payment_not_found() -> DomainError {
    DomainError::not_found(ErrorCode::PaymentNotFound, "Payment not found")
}

#[derive(Debug, Clone)]
pub struct ApprovePaymentCommand {
    pub payment_id: PaymentId,
    pub admin_id: UserId,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApprovePaymentResult {
    pub payment: Payment,
    pub enrollment: Enrollment,
    /// Cashback owed to the payer's referrer, if this payment settled it.
    pub referral_cashback: Option<Money>,
}

/// Approves a pending payment.
///
/// The status change, the new enrollment and the referrer's one-time
/// cashback are handed to the repository as a single approval.
pub struct ApprovePaymentHandler {
    payments: Arc<dyn PaymentRepository>,
    programs: Arc<dyn ProgramRepository>,
    enrollments: Arc<dyn EnrollmentReader>,
    referrals: Arc<dyn ReferralRepository>,
    cashback_percent: u8,
}

impl ApprovePaymentHandler {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        programs: Arc<dyn ProgramRepository>,
        enrollments: Arc<dyn EnrollmentReader>,
        referrals: Arc<dyn ReferralRepository>,
        cashback_percent: u8,
    ) -> Self {
        Self {
            payments,
            programs,
            enrollments,
            referrals,
            cashback_percent,
        }
    }

    pub async fn handle(
        &self,
        cmd: ApprovePaymentCommand,
    ) -> Result<ApprovePaymentResult, DomainError> {
        let now = Timestamp::now();
        let mut payment = self
            .payments
            .find(&cmd.payment_id)
            .await?
            .ok_or_else(payment_not_found)?;
        payment.approve(cmd.admin_id, now)?;

        // Inactive programs still grant access for payments already submitted.
        let program = self
            .programs
            .find(&payment.program_id)
            .await?
            .ok_or_else(program_not_found)?;
        let current_end = self
            .enrollments
            .latest_end(&payment.user_id, &program.id)
            .await?;
        let enrollment = Enrollment::grant(
            payment.user_id,
            program.id,
            payment.id,
            program.duration_weeks,
            current_end,
            now,
        );

        let cashback = self.cashback_for(&payment).await?;
        let referral_cashback = cashback.as_ref().map(|c| c.amount);

        self.payments
            .approve(&PaymentApproval {
                payment: payment.clone(),
                enrollment: enrollment.clone(),
                cashback,
            })
            .await?;

        tracing::info!(
            payment_id = %payment.id,
            admin_id = %cmd.admin_id,
            enrollment_ends = %enrollment.ends_at.as_datetime(),
            cashback = ?referral_cashback.map(|m| m.cents()),
            "payment approved"
        );

        Ok(ApprovePaymentResult {
            payment,
            enrollment,
            referral_cashback,
        })
    }

    async fn cashback_for(
        &self,
        payment: &Payment,
    ) -> Result<Option<CashbackSettlement>, DomainError> {
        let referral = match self.referrals.find_by_referred(&payment.user_id).await? {
            Some(referral) if !referral.is_cashback_settled() => referral,
            _ => return Ok(None),
        };

        let amount = Referral::cashback_for(payment.amount, self.cashback_percent);
        let posting = if amount.is_zero() {
            None
        } else {
            Some(Posting::new(
                referral.referrer_id,
                LedgerCategory::ReferralPaymentCashback,
                amount,
                Some(*payment.id.as_uuid()),
                "Cashback for a referred member's first payment",
            )?)
        };

        Ok(Some(CashbackSettlement {
            referral_id: referral.id,
            amount,
            posting,
        }))
    }
}
