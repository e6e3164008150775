//! HTTP handlers for authentication endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::auth::{LoginCommand, SignupCommand};

use super::dto::{AccountResponse, AuthResponse, LoginRequest, SignupRequest};

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .signup_handler()
        .handle(SignupCommand {
            email: request.email,
            password: request.password,
            display_name: request.display_name,
            referral_code: request.referral_code,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AuthResponse::from(session))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .login_handler()
        .handle(LoginCommand {
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok(Json(AuthResponse::from(session)))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let account = state.current_account_handler().handle(&user.id).await?;
    Ok(Json(AccountResponse::from(account)))
}
