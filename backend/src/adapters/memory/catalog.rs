//! Program, enrollment and payment ports over the in-memory store.

use async_trait::async_trait;

use super::{newest_first, InMemoryStore};
use crate::domain::foundation::{
    DomainError, ErrorCode, Page, PageRequest, PaymentId, ProgramId, ReviewStatus, Timestamp,
    UserId,
};
use crate::domain::payment::{already_reviewed, Payment};
use crate::domain::program::{EnrollmentView, Program};
use crate::ports::{EnrollmentReader, PaymentApproval, PaymentRepository, ProgramRepository};

#[async_trait]
impl ProgramRepository for InMemoryStore {
    async fn create(&self, program: &Program) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.programs.contains_key(&program.id) {
            return Err(DomainError::conflict("Program already exists"));
        }
        state.programs.insert(program.id, program.clone());
        Ok(())
    }

    async fn update(&self, program: &Program) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        match state.programs.get_mut(&program.id) {
            Some(existing) => {
                *existing = program.clone();
                Ok(())
            }
            None => Err(DomainError::not_found(ErrorCode::ProgramNotFound, "Program not found")),
        }
    }

    async fn find(&self, id: &ProgramId) -> Result<Option<Program>, DomainError> {
        Ok(self.state.read().await.programs.get(id).cloned())
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Program>, DomainError> {
        let state = self.state.read().await;
        let mut programs: Vec<Program> = state
            .programs
            .values()
            .filter(|p| !active_only || p.is_active)
            .cloned()
            .collect();
        programs.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(programs)
    }
}

#[async_trait]
impl EnrollmentReader for InMemoryStore {
    async fn list_for_user(
        &self,
        user_id: &UserId,
        now: Timestamp,
    ) -> Result<Vec<EnrollmentView>, DomainError> {
        let state = self.state.read().await;
        let mine: Vec<_> = state
            .enrollments
            .iter()
            .filter(|e| e.user_id == *user_id)
            .cloned()
            .collect();
        Ok(newest_first(&mine, |e| e.starts_at)
            .into_iter()
            .map(|enrollment| EnrollmentView {
                program_title: state
                    .programs
                    .get(&enrollment.program_id)
                    .map(|p| p.title.clone())
                    .unwrap_or_default(),
                is_active: enrollment.is_active_at(now),
                enrollment,
            })
            .collect())
    }

    async fn latest_end(
        &self,
        user_id: &UserId,
        program_id: &ProgramId,
    ) -> Result<Option<Timestamp>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .enrollments
            .iter()
            .filter(|e| e.user_id == *user_id && e.program_id == *program_id)
            .map(|e| e.ends_at)
            .max())
    }

    async fn has_access(
        &self,
        user_id: &UserId,
        program_id: &ProgramId,
        at: Timestamp,
    ) -> Result<bool, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .enrollments
            .iter()
            .any(|e| e.user_id == *user_id && e.program_id == *program_id && e.is_active_at(at)))
    }
}

#[async_trait]
impl PaymentRepository for InMemoryStore {
    async fn submit(&self, payment: &Payment) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let duplicate = state.payments.iter().any(|p| {
            p.user_id == payment.user_id && p.program_id == payment.program_id && p.is_pending()
        });
        if duplicate {
            return Err(DomainError::conflict(
                "A payment for this program is already awaiting review",
            ));
        }
        state.payments.push(payment.clone());
        Ok(())
    }

    async fn find(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError> {
        let state = self.state.read().await;
        Ok(state.payments.iter().find(|p| p.id == *id).cloned())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Payment>, DomainError> {
        let state = self.state.read().await;
        let mine: Vec<Payment> = state
            .payments
            .iter()
            .filter(|p| p.user_id == *user_id)
            .cloned()
            .collect();
        Ok(newest_first(&mine, |p| p.created_at))
    }

    async fn list(
        &self,
        status: Option<ReviewStatus>,
        page: &PageRequest,
    ) -> Result<Page<Payment>, DomainError> {
        let state = self.state.read().await;
        let matching: Vec<Payment> = state
            .payments
            .iter()
            .filter(|p| status.map_or(true, |s| p.status == s))
            .cloned()
            .collect();
        Ok(Page::from_vec(newest_first(&matching, |p| p.created_at), page))
    }

    async fn approve(&self, approval: &PaymentApproval) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let payment = &approval.payment;

        let index = state
            .payments
            .iter()
            .position(|p| p.id == payment.id && p.is_pending())
            .ok_or_else(|| already_reviewed(&payment.id))?;

        // Cashback is skipped when the referral was settled in the meantime.
        let settled = match &approval.cashback {
            Some(cashback) => state
                .referrals
                .iter()
                .position(|r| r.id == cashback.referral_id && !r.is_cashback_settled())
                .map(|i| {
                    let mut referral = state.referrals[i].clone();
                    let at = payment.reviewed_at.unwrap_or_else(Timestamp::now);
                    referral
                        .settle_cashback(cashback.amount, at)
                        .map(|()| (i, referral, cashback.posting.as_ref()))
                })
                .transpose()?,
            None => None,
        };

        // The posting is the last fallible step; nothing is written before it.
        if let Some((_, _, Some(posting))) = &settled {
            state.apply_posting(posting)?;
        }

        state.payments[index] = payment.clone();
        state.enrollments.push(approval.enrollment.clone());
        if let Some((i, referral, _)) = settled {
            state.referrals[i] = referral;
        }
        Ok(())
    }

    async fn reject(&self, payment: &Payment) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let existing = state
            .payments
            .iter_mut()
            .find(|p| p.id == payment.id && p.is_pending())
            .ok_or_else(|| already_reviewed(&payment.id))?;
        *existing = payment.clone();
        Ok(())
    }
}
