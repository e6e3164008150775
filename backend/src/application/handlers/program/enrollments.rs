//! Query handlers for enrollments and program access.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{DomainError, ProgramId, Timestamp, UserId};
use crate::domain::program::EnrollmentView;
use crate::ports::{EnrollmentReader, ProgramRepository};

use super::list_programs::program_not_found;

pub struct ListEnrollmentsHandler {
    enrollments: Arc<dyn EnrollmentReader>,
}

impl ListEnrollmentsHandler {
    pub fn new(enrollments: Arc<dyn EnrollmentReader>) -> Self {
        Self { enrollments }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<Vec<EnrollmentView>, DomainError> {
        self.enrollments.list_for_user(user_id, Timestamp::now()).await
    }
}

/// Whether the caller can use a program right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramAccess {
    pub program_id: ProgramId,
    pub has_access: bool,
    /// End of the furthest enrollment, when access is granted.
    pub access_until: Option<Timestamp>,
}

pub struct CheckProgramAccessHandler {
    programs: Arc<dyn ProgramRepository>,
    enrollments: Arc<dyn EnrollmentReader>,
}

impl CheckProgramAccessHandler {
    pub fn new(
        programs: Arc<dyn ProgramRepository>,
        enrollments: Arc<dyn EnrollmentReader>,
    ) -> Self {
        Self {
            programs,
            enrollments,
        }
    }

    pub async fn handle(
        &self,
        user_id: &UserId,
        program_id: &ProgramId,
    ) -> Result<ProgramAccess, DomainError> {
        if self.programs.find(program_id).await?.is_none() {
            return Err(program_not_found());
        }

        let has_access = self
            .enrollments
            .has_access(user_id, program_id, Timestamp::now())
            .await?;
        let access_until = if has_access {
            self.enrollments.latest_end(user_id, program_id).await?
        } else {
            None
        };

        Ok(ProgramAccess {
            program_id: *program_id,
            has_access,
            access_until,
        })
    }
}
