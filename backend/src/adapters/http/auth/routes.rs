use axum::routing::{get, post};
use axum::Router;

use super::handlers::{login, me, signup};
use crate::adapters::http::state::AppState;

/// `/auth/*` routes.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
}
