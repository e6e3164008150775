//! Admin back office: dashboard numbers and user moderation.
//!
//! Routes here are mounted under `/admin`; every handler requires the admin role.

mod dto;
mod handlers;

use axum::routing::get;
use axum::Router;

use crate::adapters::http::state::AppState;
use handlers::{dashboard_stats, get_user, list_users, update_user};

pub use dto::{UpdateUserRequest, UserDetailResponse, UserSearchParams};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(dashboard_stats))
        .route("/users", get(list_users))
        .route("/users/:id", get(get_user).patch(update_user))
}
