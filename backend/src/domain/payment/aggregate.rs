//! Off-platform payment awaiting admin review.
//!
//! # Invariants
//!
//! - `amount` equals the program price at submission time
//! - at most one pending payment per (user, program)
//! - status follows `ReviewStatus`: Pending → Approved | Rejected

use serde::Serialize;

use crate::domain::foundation::{
    bounded_text, DomainError, ErrorCode, Money, PaymentId, ProgramId, ReviewStatus, StateMachine,
    Timestamp, UserId, ValidationError,
};
use crate::domain::program::Program;

const MAX_REFERENCE_LEN: usize = 100;
const MAX_RECEIPT_URL_LEN: usize = 2048;
pub const MAX_REASON_LEN: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payment {
    pub id: PaymentId,
    pub user_id: UserId,
    pub program_id: ProgramId,
    pub amount: Money,
    pub reference: String,
    pub receipt_url: String,
    pub status: ReviewStatus,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<UserId>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Payment {
    pub fn submit(
        user_id: UserId,
        program: &Program,
        amount_cents: i64,
        reference: &str,
        receipt_url: &str,
    ) -> Result<Self, DomainError> {
        if !program.is_active {
            return Err(DomainError::validation("program_id", "Program is not available"));
        }
        let amount = Money::from_cents(amount_cents)?;
        if amount != program.price {
            return Err(DomainError::validation(
                "amount_cents",
                format!("Amount must equal the program price of {}", program.price.cents()),
            ));
        }
        Ok(Self {
            id: PaymentId::new(),
            user_id,
            program_id: program.id,
            amount,
            reference: bounded_text("reference", reference, 1, MAX_REFERENCE_LEN)?,
            receipt_url: validate_receipt_url(receipt_url)?,
            status: ReviewStatus::Pending,
            rejection_reason: None,
            reviewed_by: None,
            reviewed_at: None,
            created_at: Timestamp::now(),
        })
    }

    pub fn approve(&mut self, admin: UserId, at: Timestamp) -> Result<(), DomainError> {
        self.status = self.status.transition_to(ReviewStatus::Approved)?;
        self.reviewed_by = Some(admin);
        self.reviewed_at = Some(at);
        Ok(())
    }

    pub fn reject(&mut self, admin: UserId, reason: &str, at: Timestamp) -> Result<(), DomainError> {
        let reason = bounded_text("reason", reason, 1, MAX_REASON_LEN)?;
        self.status = self.status.transition_to(ReviewStatus::Rejected)?;
        self.rejection_reason = Some(reason);
        self.reviewed_by = Some(admin);
        self.reviewed_at = Some(at);
        Ok(())
    }

    pub fn is_pending(&self) -> bool {
        self.status == ReviewStatus::Pending
    }
}

fn validate_receipt_url(raw: &str) -> Result<String, ValidationError> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(ValidationError::empty_field("receipt_url"));
    }
    if url.len() > MAX_RECEIPT_URL_LEN {
        return Err(ValidationError::invalid_format("receipt_url", "too long"));
    }
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| ValidationError::invalid_format("receipt_url", "must be an http(s) URL"))?;
    if rest.is_empty() || rest.starts_with('/') || url.chars().any(char::is_whitespace) {
        return Err(ValidationError::invalid_format("receipt_url", "missing host"));
    }
    Ok(url.to_string())
}

/// Error used when a concurrent reviewer already decided a payment.
pub fn already_reviewed(id: &PaymentId) -> DomainError {
    DomainError::new(
        ErrorCode::InvalidStateTransition,
        format!("Payment {} has already been reviewed", id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::program::{ProgramDraft, ProgramLevel};

    fn program(price: i64) -> Program {
        Program::create(ProgramDraft {
            title: "Strength Foundations".to_string(),
            description: None,
            level: ProgramLevel::Intermediate,
            duration_weeks: 8,
            price_cents: price,
            is_active: true,
        })
        .unwrap()
    }

    fn submit(program: &Program, amount: i64, url: &str) -> Result<Payment, DomainError> {
        Payment::submit(UserId::new(), program, amount, "TX-1001", url)
    }

    #[test]
    fn submit_requires_exact_price() {
        let p = program(4900);
        assert!(submit(&p, 4900, "https://receipts.example.com/1").is_ok());
        let err = submit(&p, 4000, "https://receipts.example.com/1").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn submit_rejects_inactive_program() {
        let mut p = program(4900);
        p.is_active = false;
        assert!(submit(&p, 4900, "https://receipts.example.com/1").is_err());
    }

    #[test]
    fn submit_requires_http_receipt() {
        let p = program(100);
        assert!(submit(&p, 100, "ftp://receipts.example.com/1").is_err());
        assert!(submit(&p, 100, "https://").is_err());
        assert!(submit(&p, 100, "http://files.example.com/r.png").is_ok());
    }

    #[test]
    fn approve_then_reject_fails() {
        let p = program(100);
        let mut payment = submit(&p, 100, "https://r.example.com/x").unwrap();
        payment.approve(UserId::new(), Timestamp::now()).unwrap();

        let err = payment
            .reject(UserId::new(), "duplicate", Timestamp::now())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(payment.status, ReviewStatus::Approved);
    }

    #[test]
    fn reject_requires_reason() {
        let p = program(100);
        let mut payment = submit(&p, 100, "https://r.example.com/x").unwrap();
        assert!(payment.reject(UserId::new(), "  ", Timestamp::now()).is_err());
        assert!(payment.is_pending());
    }
}
