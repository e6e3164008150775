//! Program catalog and enrollment ports.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProgramId, Timestamp, UserId};
use crate::domain::program::{EnrollmentView, Program};

#[async_trait]
pub trait ProgramRepository: Send + Sync {
    async fn create(&self, program: &Program) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `ProgramNotFound` if the program doesn't exist
    async fn update(&self, program: &Program) -> Result<(), DomainError>;

    async fn find(&self, id: &ProgramId) -> Result<Option<Program>, DomainError>;

    /// Ordered by title. `active_only` hides retired programs.
    async fn list(&self, active_only: bool) -> Result<Vec<Program>, DomainError>;
}

/// Read side for enrollments. Enrollments are written only by
/// `PaymentRepository::approve`.
#[async_trait]
pub trait EnrollmentReader: Send + Sync {
    /// The user's enrollments, newest first, with activity evaluated at `now`.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        now: Timestamp,
    ) -> Result<Vec<EnrollmentView>, DomainError>;

    /// Latest end date across the user's enrollments in a program.
    async fn latest_end(
        &self,
        user_id: &UserId,
        program_id: &ProgramId,
    ) -> Result<Option<Timestamp>, DomainError>;

    /// True when an enrollment covers `at`.
    async fn has_access(
        &self,
        user_id: &UserId,
        program_id: &ProgramId,
        at: Timestamp,
    ) -> Result<bool, DomainError>;
}
