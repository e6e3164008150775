//! HTTP handlers for profile and onboarding.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::profile::UpdateProfileCommand;

use super::dto::UpdateProfileRequest;

/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let view = state.get_profile_handler().handle(&user.id).await?;
    Ok(Json(view))
}

/// PUT /api/profile
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state
        .update_profile_handler()
        .handle(UpdateProfileCommand {
            user_id: user.id,
            patch: request.into(),
        })
        .await?;
    Ok(Json(view))
}

/// POST /api/profile/onboarding
pub async fn complete_onboarding(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.complete_onboarding_handler().handle(&user.id).await?;
    Ok(Json(profile))
}
