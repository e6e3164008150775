//! HTTP handlers for weight and workout tracking.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::dto::PageParams;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::{ApiJson, ApiPath, ApiQuery};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::tracking::{
    ListWeightsQuery, LogWeightCommand, LogWorkoutCommand,
};
use crate::domain::foundation::{WeightEntryId, WorkoutId};

use super::dto::{LogWeightRequest, LogWorkoutRequest, WeightRangeParams};

// ════════════════════════════════════════════════════════════════════════════════
// Weight
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/weights
pub async fn list_weights(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiQuery(range): ApiQuery<WeightRangeParams>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = state
        .list_weights_handler()
        .handle(ListWeightsQuery {
            user_id: user.id,
            from: range.from,
            to: range.to,
        })
        .await?;
    Ok(Json(entries))
}

/// POST /api/weights
pub async fn log_weight(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<LogWeightRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = state
        .log_weight_handler()
        .handle(LogWeightCommand {
            user_id: user.id,
            weight_kg: request.weight_kg,
            recorded_on: request.recorded_on,
            note: request.note,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// DELETE /api/weights/:id
pub async fn delete_weight(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(id): ApiPath<WeightEntryId>,
) -> Result<impl IntoResponse, ApiError> {
    state.delete_weight_handler().handle(&user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/weights/summary
pub async fn weight_summary(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state.weight_summary_handler().handle(&user.id).await?;
    Ok(Json(summary))
}

// ════════════════════════════════════════════════════════════════════════════════
// Workouts
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/workouts
pub async fn list_workouts(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = params.to_request()?;
    let workouts = state.list_workouts_handler().handle(&user.id, &page).await?;
    Ok(Json(workouts))
}

/// POST /api/workouts
pub async fn log_workout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<LogWorkoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let workout = state
        .log_workout_handler()
        .handle(LogWorkoutCommand {
            user_id: user.id,
            title: request.title,
            performed_at: request.performed_at,
            duration_minutes: request.duration_minutes,
            notes: request.notes,
            exercises: request.exercises.into_iter().map(Into::into).collect(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(workout)))
}

/// GET /api/workouts/:id
pub async fn get_workout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(id): ApiPath<WorkoutId>,
) -> Result<impl IntoResponse, ApiError> {
    let workout = state.get_workout_handler().handle(&user.id, &id).await?;
    Ok(Json(workout))
}

/// DELETE /api/workouts/:id
pub async fn delete_workout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(id): ApiPath<WorkoutId>,
) -> Result<impl IntoResponse, ApiError> {
    state.delete_workout_handler().handle(&user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/workouts/stats
pub async fn workout_stats(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state.workout_stats_handler().handle(&user.id).await?;
    Ok(Json(stats))
}
