//! HTTP handlers for admin dashboard and user management.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::auth::AccountResponse;
use crate::adapters::http::dto::PageResponse;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::{ApiJson, ApiPath, ApiQuery};
use crate::adapters::http::middleware::RequireAdmin;
use crate::adapters::http::state::AppState;
use crate::application::handlers::admin::{ListUsersQuery, UpdateUserCommand};
use crate::domain::foundation::{PageRequest, UserId};

use super::dto::{UpdateUserRequest, UserDetailResponse, UserSearchParams};

/// GET /api/admin/stats
pub async fn dashboard_stats(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state.dashboard_stats_handler().handle().await?;
    Ok(Json(stats))
}

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ApiQuery(params): ApiQuery<UserSearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .list_users_handler()
        .handle(ListUsersQuery {
            search: params.search,
            page: PageRequest::new(params.page, params.per_page)?,
        })
        .await?;
    Ok(Json(PageResponse::from_page(page, AccountResponse::from)))
}

/// GET /api/admin/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ApiPath(user_id): ApiPath<UserId>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = state.get_user_handler().handle(&user_id).await?;
    Ok(Json(UserDetailResponse::from(detail)))
}

/// PATCH /api/admin/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiPath(user_id): ApiPath<UserId>,
    ApiJson(request): ApiJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let account = state
        .update_user_handler()
        .handle(UpdateUserCommand {
            actor: admin.id,
            user_id,
            role: request.role,
            is_active: request.is_active,
        })
        .await?;
    Ok(Json(AccountResponse::from(account)))
}
