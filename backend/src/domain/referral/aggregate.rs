//! Referral record linking a referrer to the account they brought in.
//!
//! # Invariants
//!
//! - a user is referred at most once (unique `referred_id`)
//! - nobody refers themselves
//! - payment cashback is settled at most once (`cashback_paid_at` is set once)

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, Money, ReferralId, Timestamp, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Referral {
    pub id: ReferralId,
    pub referrer_id: UserId,
    pub referred_id: UserId,
    /// Bonus credited to the referrer at signup (zero when disabled).
    pub signup_bonus: Money,
    /// Cashback credited on the referred user's first approved payment.
    pub cashback: Option<Money>,
    pub cashback_paid_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Referral {
    pub fn new(
        referrer_id: UserId,
        referred_id: UserId,
        signup_bonus: Money,
    ) -> Result<Self, DomainError> {
        if referrer_id == referred_id {
            return Err(DomainError::new(
                ErrorCode::ReferralInvalid,
                "Users cannot refer themselves",
            ));
        }
        Ok(Self {
            id: ReferralId::new(),
            referrer_id,
            referred_id,
            signup_bonus,
            cashback: None,
            cashback_paid_at: None,
            created_at: Timestamp::now(),
        })
    }

    pub fn is_cashback_settled(&self) -> bool {
        self.cashback_paid_at.is_some()
    }

    /// Cashback owed for a payment: `floor(amount * percent / 100)`.
    pub fn cashback_for(payment_amount: Money, percent: u8) -> Money {
        payment_amount.percent_floor(percent)
    }

    /// Marks cashback as settled. Fails if it already was.
    pub fn settle_cashback(&mut self, amount: Money, at: Timestamp) -> Result<(), DomainError> {
        if self.is_cashback_settled() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Referral cashback already settled",
            ));
        }
        self.cashback = Some(amount);
        self.cashback_paid_at = Some(at);
        Ok(())
    }

    /// Everything credited to the referrer through this referral.
    pub fn total_earned(&self) -> Money {
        let cashback = self.cashback.unwrap_or(Money::ZERO);
        self.signup_bonus.checked_add(cashback).unwrap_or(self.signup_bonus)
    }
}
