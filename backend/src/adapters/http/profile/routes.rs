use axum::routing::{get, post};
use axum::Router;

use super::handlers::{complete_onboarding, get_profile, update_profile};
use crate::adapters::http::state::AppState;

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/profile/onboarding", post(complete_onboarding))
}
