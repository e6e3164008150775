use axum::routing::{get, put};
use axum::Router;

use super::handlers::{
    admin_list_programs, create_program, get_program, list_enrollments, list_programs,
    program_access, update_program,
};
use crate::adapters::http::state::AppState;

/// Public catalog plus the caller's enrollments.
pub fn program_routes() -> Router<AppState> {
    Router::new()
        .route("/programs", get(list_programs))
        .route("/programs/:id", get(get_program))
        .route("/programs/:id/access", get(program_access))
        .route("/enrollments", get(list_enrollments))
}

/// Mounted under `/admin`.
pub fn admin_program_routes() -> Router<AppState> {
    Router::new()
        .route("/programs", get(admin_list_programs).post(create_program))
        .route("/programs/:id", put(update_program))
}
