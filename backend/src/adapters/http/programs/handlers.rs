//! HTTP handlers for programs, enrollments and program administration.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::{ApiJson, ApiPath};
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::adapters::http::state::AppState;
use crate::application::handlers::program::{CatalogScope, UpdateProgramCommand};
use crate::domain::foundation::ProgramId;
use crate::domain::program::Program;

use super::dto::{CreateProgramRequest, ProgramResponse, UpdateProgramRequest};

fn responses(programs: Vec<Program>) -> Vec<ProgramResponse> {
    programs.into_iter().map(ProgramResponse::from).collect()
}

/// GET /api/programs
pub async fn list_programs(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let programs = state
        .list_programs_handler()
        .handle(CatalogScope::Active)
        .await?;
    Ok(Json(responses(programs)))
}

/// GET /api/programs/:id
pub async fn get_program(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProgramId>,
) -> Result<impl IntoResponse, ApiError> {
    let program = state
        .get_program_handler()
        .handle(&id, CatalogScope::Active)
        .await?;
    Ok(Json(ProgramResponse::from(program)))
}

/// GET /api/programs/:id/access
pub async fn program_access(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(id): ApiPath<ProgramId>,
) -> Result<impl IntoResponse, ApiError> {
    let access = state.program_access_handler().handle(&user.id, &id).await?;
    Ok(Json(access))
}

/// GET /api/enrollments
pub async fn list_enrollments(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let enrollments = state.list_enrollments_handler().handle(&user.id).await?;
    Ok(Json(enrollments))
}

/// GET /api/admin/programs
pub async fn admin_list_programs(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<impl IntoResponse, ApiError> {
    let programs = state.list_programs_handler().handle(CatalogScope::All).await?;
    Ok(Json(responses(programs)))
}

/// POST /api/admin/programs
pub async fn create_program(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ApiJson(request): ApiJson<CreateProgramRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let program = state.create_program_handler().handle(request.into()).await?;
    Ok((StatusCode::CREATED, Json(ProgramResponse::from(program))))
}

/// PUT /api/admin/programs/:id
pub async fn update_program(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ApiPath(id): ApiPath<ProgramId>,
    ApiJson(request): ApiJson<UpdateProgramRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let program = state
        .update_program_handler()
        .handle(UpdateProgramCommand {
            program_id: id,
            update: request.into(),
        })
        .await?;
    Ok(Json(ProgramResponse::from(program)))
}
