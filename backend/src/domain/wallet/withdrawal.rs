//! Cash-out requests against a wallet.
//!
//! Funds leave the wallet when the request is made. Rejection returns them
//! with a `withdrawal_reversal` credit; approval only records the decision.

use serde::Serialize;

use super::{insufficient_funds, LedgerCategory, Posting};
use crate::domain::foundation::{
    bounded_text, DomainError, Money, ReviewStatus, StateMachine, Timestamp, UserId,
    ValidationError, WithdrawalId,
};
use crate::domain::payment::MAX_REASON_LEN;

const MAX_DESTINATION_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Withdrawal {
    pub id: WithdrawalId,
    pub user_id: UserId,
    pub amount: Money,
    pub destination: String,
    pub status: ReviewStatus,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<UserId>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Withdrawal {
    /// Creates a pending withdrawal and the debit that funds it.
    pub fn request(
        user_id: UserId,
        amount_cents: i64,
        destination: &str,
        minimum: Money,
        balance: Money,
    ) -> Result<(Self, Posting), DomainError> {
        let amount = Money::positive("amount_cents", amount_cents)?;
        if amount < minimum {
            return Err(ValidationError::out_of_range(
                "amount_cents",
                minimum.cents(),
                i64::MAX,
                amount_cents,
            )
            .into());
        }
        let destination = bounded_text("destination", destination, 1, MAX_DESTINATION_LEN)?;
        if amount > balance {
            return Err(insufficient_funds());
        }

        let withdrawal = Self {
            id: WithdrawalId::new(),
            user_id,
            amount,
            destination,
            status: ReviewStatus::Pending,
            rejection_reason: None,
            reviewed_by: None,
            reviewed_at: None,
            created_at: Timestamp::now(),
        };
        let debit = Posting::new(
            user_id,
            LedgerCategory::Withdrawal,
            amount,
            Some(*withdrawal.id.as_uuid()),
            format!("Withdrawal to {}", withdrawal.destination),
        )?;
        Ok((withdrawal, debit))
    }

    pub fn approve(&mut self, admin: UserId, at: Timestamp) -> Result<(), DomainError> {
        self.status = self.status.transition_to(ReviewStatus::Approved)?;
        self.reviewed_by = Some(admin);
        self.reviewed_at = Some(at);
        Ok(())
    }

    /// Rejects the request and returns the credit that restores the funds.
    pub fn reject(
        &mut self,
        admin: UserId,
        reason: &str,
        at: Timestamp,
    ) -> Result<Posting, DomainError> {
        let reason = bounded_text("reason", reason, 1, MAX_REASON_LEN)?;
        self.status = self.status.transition_to(ReviewStatus::Rejected)?;
        let reversal = Posting::new(
            self.user_id,
            LedgerCategory::WithdrawalReversal,
            self.amount,
            Some(*self.id.as_uuid()),
            format!("Withdrawal rejected: {}", reason),
        )?;
        self.rejection_reason = Some(reason);
        self.reviewed_by = Some(admin);
        self.reviewed_at = Some(at);
        Ok(reversal)
    }
}
