//! Time-boxed access to a program, granted by an approved payment.

use serde::Serialize;

use crate::domain::foundation::{EnrollmentId, PaymentId, ProgramId, Timestamp, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub user_id: UserId,
    pub program_id: ProgramId,
    pub payment_id: PaymentId,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub created_at: Timestamp,
}

impl Enrollment {
    /// Grants `duration_weeks` of access.
    ///
    /// When the user still has a running enrollment for the same program
    /// (`current_end` in the future), the new period starts where it ends.
    pub fn grant(
        user_id: UserId,
        program_id: ProgramId,
        payment_id: PaymentId,
        duration_weeks: i32,
        current_end: Option<Timestamp>,
        now: Timestamp,
    ) -> Self {
        let starts_at = match current_end {
            Some(end) if end.is_after(&now) => end,
            _ => now,
        };
        Self {
            id: EnrollmentId::new(),
            user_id,
            program_id,
            payment_id,
            starts_at,
            ends_at: starts_at.add_weeks(duration_weeks as i64),
            created_at: now,
        }
    }

    pub fn is_active_at(&self, at: Timestamp) -> bool {
        !at.is_before(&self.starts_at) && at.is_before(&self.ends_at)
    }
}

/// Enrollment joined with its program title for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrollmentView {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub program_title: String,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_enrollment_starts_now() {
        let now = Timestamp::now();
        let e = Enrollment::grant(UserId::new(), ProgramId::new(), PaymentId::new(), 4, None, now);
        assert_eq!(e.starts_at, now);
        assert_eq!(e.ends_at, now.add_weeks(4));
        assert!(e.is_active_at(now));
    }

    #[test]
    fn renewal_extends_running_enrollment() {
        let now = Timestamp::now();
        let current_end = now.add_days(10);
        let e = Enrollment::grant(
            UserId::new(),
            ProgramId::new(),
            PaymentId::new(),
            2,
            Some(current_end),
            now,
        );
        assert_eq!(e.starts_at, current_end);
        assert!(!e.is_active_at(now));
    }

    #[test]
    fn expired_enrollment_does_not_delay_start() {
        let now = Timestamp::now();
        let e = Enrollment::grant(
            UserId::new(),
            ProgramId::new(),
            PaymentId::new(),
            2,
            Some(now.add_days(-3)),
            now,
        );
        assert_eq!(e.starts_at, now);
    }

    #[test]
    fn access_ends_at_end_instant() {
        let now = Timestamp::now();
        let e = Enrollment::grant(UserId::new(), ProgramId::new(), PaymentId::new(), 1, None, now);
        assert!(!e.is_active_at(e.ends_at));
    }
}
