//! Referral overview endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;

/// GET /api/referrals
pub async fn referral_overview(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let overview = state.referral_overview_handler().handle(&user.id).await?;
    Ok(Json(overview))
}

pub fn referral_routes() -> Router<AppState> {
    Router::new().route("/referrals", get(referral_overview))
}
