//! Query handlers for the program catalog.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, ProgramId};
use crate::domain::program::Program;
use crate::ports::ProgramRepository;

pub(crate) fn program_not_found() -> DomainError {
    DomainError::not_found(ErrorCode::ProgramNotFound, "Program not found")
}

/// Which programs a listing may show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogScope {
    /// Public catalog: active programs only.
    Active,
    /// Back office: everything, including retired programs.
    All,
}

pub struct ListProgramsHandler {
    programs: Arc<dyn ProgramRepository>,
}

impl ListProgramsHandler {
    pub fn new(programs: Arc<dyn ProgramRepository>) -> Self {
        Self { programs }
    }

    pub async fn handle(&self, scope: CatalogScope) -> Result<Vec<Program>, DomainError> {
        self.programs.list(scope == CatalogScope::Active).await
    }
}

pub struct GetProgramHandler {
    programs: Arc<dyn ProgramRepository>,
}

impl GetProgramHandler {
    pub fn new(programs: Arc<dyn ProgramRepository>) -> Self {
        Self { programs }
    }

    /// Inactive programs are hidden from the public scope.
    pub async fn handle(&self, id: &ProgramId, scope: CatalogScope) -> Result<Program, DomainError> {
        self.programs
            .find(id)
            .await?
            .filter(|p| p.is_active || scope == CatalogScope::All)
            .ok_or_else(program_not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support;
    use crate::domain::program::ProgramUpdate;

    #[tokio::test]
    async fn retired_program_is_hidden_from_public_catalog() {
        let store = test_support::store();
        let live = test_support::program(&store, 1500, 4).await;
        let mut retired = test_support::program(&store, 900, 2).await;
        retired
            .apply(ProgramUpdate {
                is_active: Some(false),
                ..Default::default()
            })
            .unwrap();
        store.update(&retired).await.unwrap();

        let list = ListProgramsHandler::new(store.clone());
        let public = list.handle(CatalogScope::Active).await.unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].id, live.id);
        assert_eq!(list.handle(CatalogScope::All).await.unwrap().len(), 2);

        let get = GetProgramHandler::new(store);
        let err = get.handle(&retired.id, CatalogScope::Active).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ProgramNotFound);
        assert!(get.handle(&retired.id, CatalogScope::All).await.is_ok());
    }
}
