//! Wallet balance and its immutable ledger.
//!
//! A wallet's balance only changes through a [`Posting`], and every applied
//! posting yields exactly one [`LedgerEntry`] recording the balance after it.
//! Balances never go negative.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::foundation::{
    bounded_text, string_enum, DomainError, ErrorCode, LedgerEntryId, Money, Timestamp, UserId,
};

const MAX_DESCRIPTION_LEN: usize = 200;

string_enum! {
    pub enum Direction: "direction" {
        Credit => "credit",
        Debit => "debit",
    }
}

string_enum! {
    pub enum LedgerCategory: "category" {
        ReferralSignupBonus => "referral_signup_bonus",
        ReferralPaymentCashback => "referral_payment_cashback",
        Withdrawal => "withdrawal",
        WithdrawalReversal => "withdrawal_reversal",
        AdminCredit => "admin_credit",
        AdminDebit => "admin_debit",
    }
}

impl LedgerCategory {
    pub fn direction(&self) -> Direction {
        match self {
            LedgerCategory::Withdrawal | LedgerCategory::AdminDebit => Direction::Debit,
            _ => Direction::Credit,
        }
    }

    /// Categories that count as referral earnings.
    pub fn is_referral_reward(&self) -> bool {
        matches!(
            self,
            LedgerCategory::ReferralSignupBonus | LedgerCategory::ReferralPaymentCashback
        )
    }
}

/// A request to move money into or out of one wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub user_id: UserId,
    pub category: LedgerCategory,
    pub amount: Money,
    pub reference_id: Option<Uuid>,
    pub description: String,
}

impl Posting {
    pub fn new(
        user_id: UserId,
        category: LedgerCategory,
        amount: Money,
        reference_id: Option<Uuid>,
        description: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if amount.is_zero() {
            return Err(DomainError::validation("amount_cents", "Posting amount must be positive"));
        }
        Ok(Self {
            user_id,
            category,
            amount,
            reference_id,
            description: description.into(),
        })
    }

    /// Manual admin correction; debits use `admin_debit`, credits `admin_credit`.
    pub fn admin_adjustment(
        user_id: UserId,
        direction: Direction,
        amount_cents: i64,
        description: &str,
    ) -> Result<Self, DomainError> {
        let amount = Money::positive("amount_cents", amount_cents)?;
        let description = bounded_text("description", description, 1, MAX_DESCRIPTION_LEN)?;
        let category = match direction {
            Direction::Credit => LedgerCategory::AdminCredit,
            Direction::Debit => LedgerCategory::AdminDebit,
        };
        Self::new(user_id, category, amount, None, description)
    }

    pub fn direction(&self) -> Direction {
        self.category.direction()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub id: LedgerEntryId,
    pub user_id: UserId,
    pub direction: Direction,
    pub category: LedgerCategory,
    pub amount: Money,
    pub balance_after: Money,
    pub reference_id: Option<Uuid>,
    pub description: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Wallet {
    pub user_id: UserId,
    pub balance: Money,
    pub updated_at: Timestamp,
}

impl Wallet {
    pub fn open(user_id: UserId) -> Self {
        Self {
            user_id,
            balance: Money::ZERO,
            updated_at: Timestamp::now(),
        }
    }

    /// Applies a posting, returning the ledger entry to persist alongside.
    pub fn apply(&mut self, posting: &Posting, at: Timestamp) -> Result<LedgerEntry, DomainError> {
        if posting.user_id != self.user_id {
            return Err(DomainError::internal("Posting applied to the wrong wallet"));
        }
        let balance_after = match posting.direction() {
            Direction::Credit => self
                .balance
                .checked_add(posting.amount)
                .ok_or_else(|| DomainError::internal("Wallet balance overflow"))?,
            Direction::Debit => self
                .balance
                .checked_sub(posting.amount)
                .ok_or_else(insufficient_funds)?,
        };
        self.balance = balance_after;
        self.updated_at = at;
        Ok(LedgerEntry {
            id: LedgerEntryId::new(),
            user_id: posting.user_id,
            direction: posting.direction(),
            category: posting.category,
            amount: posting.amount,
            balance_after,
            reference_id: posting.reference_id,
            description: posting.description.clone(),
            created_at: at,
        })
    }
}

pub fn insufficient_funds() -> DomainError {
    DomainError::new(ErrorCode::InsufficientFunds, "Insufficient wallet balance")
}
