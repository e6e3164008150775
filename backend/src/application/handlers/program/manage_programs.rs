//! Admin command handlers for the program catalog.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ProgramId};
use crate::domain::program::{Program, ProgramDraft, ProgramUpdate};
use crate::ports::ProgramRepository;

use super::list_programs::program_not_found;

pub struct CreateProgramHandler {
    programs: Arc<dyn ProgramRepository>,
}

impl CreateProgramHandler {
    pub fn new(programs: Arc<dyn ProgramRepository>) -> Self {
        Self { programs }
    }

    pub async fn handle(&self, draft: ProgramDraft) -> Result<Program, DomainError> {
        let program = Program::create(draft)?;
        self.programs.create(&program).await?;
        tracing::info!(program_id = %program.id, price = %program.price, "program created");
        Ok(program)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateProgramCommand {
    pub program_id: ProgramId,
    pub update: ProgramUpdate,
}

pub struct UpdateProgramHandler {
    programs: Arc<dyn ProgramRepository>,
}

impl UpdateProgramHandler {
    pub fn new(programs: Arc<dyn ProgramRepository>) -> Self {
        Self { programs }
    }

    /// Price changes only affect payments submitted afterwards.
    pub async fn handle(&self, cmd: UpdateProgramCommand) -> Result<Program, DomainError> {
        let mut program = self
            .programs
            .find(&cmd.program_id)
            .await?
            .ok_or_else(program_not_found)?;
        program.apply(cmd.update)?;
        self.programs.update(&program).await?;
        tracing::info!(program_id = %program.id, active = program.is_active, "program updated");
        Ok(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{self, cents};
    use crate::domain::foundation::ErrorCode;
    use crate::domain::program::ProgramLevel;

    fn draft(title: &str, weeks: i32) -> ProgramDraft {
        ProgramDraft {
            title: title.to_string(),
            description: None,
            level: ProgramLevel::Advanced,
            duration_weeks: weeks,
            price_cents: 4900,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn create_validates_and_persists() {
        let store = test_support::store();
        let handler = CreateProgramHandler::new(store.clone());

        let program = handler.handle(draft("Hypertrophy", 8)).await.unwrap();
        assert!(store.find(&program.id).await.unwrap().is_some());

        let err = handler.handle(draft("Forever", 105)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn update_changes_price_and_missing_program_is_not_found() {
        let store = test_support::store();
        let program = test_support::program(&store, 1000, 4).await;
        let handler = UpdateProgramHandler::new(store);

        let updated = handler
            .handle(UpdateProgramCommand {
                program_id: program.id,
                update: ProgramUpdate {
                    price_cents: Some(1200),
                    ..Default::default()
                },
            })
            .await
            .unwrap();
        assert_eq!(updated.price, cents(1200));

        let err = handler
            .handle(UpdateProgramCommand {
                program_id: ProgramId::new(),
                update: ProgramUpdate::default(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ProgramNotFound);
    }
}
