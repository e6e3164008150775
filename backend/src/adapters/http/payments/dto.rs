//! HTTP DTOs for payments.

use serde::{Deserialize, Serialize};

use crate::application::handlers::payment::ApprovePaymentResult;
use crate::domain::foundation::{PaymentId, ProgramId, ReviewStatus, Timestamp, UserId};
use crate::domain::payment::Payment;
use crate::domain::program::Enrollment;

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitPaymentRequest {
    pub program_id: ProgramId,
    pub amount_cents: i64,
    pub reference: String,
    pub receipt_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentResponse {
    pub id: PaymentId,
    pub user_id: UserId,
    pub program_id: ProgramId,
    pub amount_cents: i64,
    pub reference: String,
    pub receipt_url: String,
    pub status: ReviewStatus,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<UserId>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            user_id: payment.user_id,
            program_id: payment.program_id,
            amount_cents: payment.amount.cents(),
            reference: payment.reference,
            receipt_url: payment.receipt_url,
            status: payment.status,
            rejection_reason: payment.rejection_reason,
            reviewed_by: payment.reviewed_by,
            reviewed_at: payment.reviewed_at,
            created_at: payment.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApprovalResponse {
    pub payment: PaymentResponse,
    pub enrollment: Enrollment,
    /// Credited to the referrer by this approval, if any.
    pub referral_cashback_cents: Option<i64>,
}

impl From<ApprovePaymentResult> for ApprovalResponse {
    fn from(result: ApprovePaymentResult) -> Self {
        Self {
            payment: result.payment.into(),
            enrollment: result.enrollment,
            referral_cashback_cents: result.referral_cashback.map(|m| m.cents()),
        }
    }
}
