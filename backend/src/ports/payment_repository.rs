//! Payment repository port.
//!
//! Approval is atomic: the status change, the enrollment and any referral
//! cashback commit together or not at all.

use async_trait::async_trait;

use crate::domain::foundation::{
    DomainError, Money, Page, PageRequest, PaymentId, ReferralId, ReviewStatus, UserId,
};
use crate::domain::payment::Payment;
use crate::domain::program::Enrollment;
use crate::domain::wallet::Posting;

/// Referral cashback settled by a payment approval.
#[derive(Debug, Clone)]
pub struct CashbackSettlement {
    pub referral_id: ReferralId,
    pub amount: Money,
    /// Credit to the referrer; absent when the cashback rounds to zero.
    pub posting: Option<Posting>,
}

#[derive(Debug, Clone)]
pub struct PaymentApproval {
    /// The payment, already transitioned to Approved.
    pub payment: Payment,
    pub enrollment: Enrollment,
    pub cashback: Option<CashbackSettlement>,
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// # Errors
    ///
    /// - `Conflict` if the user already has a pending payment for the program
    async fn submit(&self, payment: &Payment) -> Result<(), DomainError>;

    async fn find(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError>;

    /// Newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Payment>, DomainError>;

    /// Newest first, optionally filtered by status.
    async fn list(
        &self,
        status: Option<ReviewStatus>,
        page: &PageRequest,
    ) -> Result<Page<Payment>, DomainError>;

    /// Record an approval with its enrollment and cashback.
    ///
    /// The status update only applies to a payment that is still pending.
    /// Cashback is only credited if the referral has not been settled yet;
    /// a concurrently settled referral is skipped, not an error.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the payment is no longer pending
    async fn approve(&self, approval: &PaymentApproval) -> Result<(), DomainError>;

    /// Record a rejection (payment already transitioned to Rejected).
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the payment is no longer pending
    async fn reject(&self, payment: &Payment) -> Result<(), DomainError>;
}
