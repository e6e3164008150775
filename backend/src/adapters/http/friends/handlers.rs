//! HTTP handlers for friends and friend requests.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::{ApiJson, ApiPath};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::social::{
    FriendRequestDecision, FriendRequestOutcome, RespondFriendRequestCommand,
    SendFriendRequestCommand,
};
use crate::domain::foundation::{FriendshipId, UserId};

#[derive(Debug, Clone, Deserialize)]
pub struct SendFriendRequestRequest {
    pub email: String,
}

/// GET /api/friends
pub async fn list_friends(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let friends = state.list_friends_handler().handle(&user.id).await?;
    Ok(Json(friends))
}

/// GET /api/friends/activity
pub async fn friend_activity(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let feed = state.friend_activity_handler().handle(&user.id).await?;
    Ok(Json(feed))
}

/// DELETE /api/friends/:user_id
pub async fn remove_friend(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(friend_id): ApiPath<UserId>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .remove_friend_handler()
        .handle(&user.id, &friend_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/friends/requests
pub async fn list_friend_requests(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let requests = state.list_friend_requests_handler().handle(&user.id).await?;
    Ok(Json(requests))
}

/// POST /api/friends/requests
///
/// 201 when a new request is created, 200 when an existing pair changed state.
pub async fn send_friend_request(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<SendFriendRequestRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .send_friend_request_handler()
        .handle(SendFriendRequestCommand {
            user_id: user.id,
            email: request.email,
        })
        .await?;
    let status = match result.outcome {
        FriendRequestOutcome::Sent => StatusCode::CREATED,
        FriendRequestOutcome::Accepted | FriendRequestOutcome::Reopened => StatusCode::OK,
    };
    Ok((status, Json(result)))
}

/// POST /api/friends/requests/:id/accept
pub async fn accept_friend_request(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(id): ApiPath<FriendshipId>,
) -> Result<impl IntoResponse, ApiError> {
    respond(state, user.id, id, FriendRequestDecision::Accept).await
}

/// POST /api/friends/requests/:id/decline
pub async fn decline_friend_request(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(id): ApiPath<FriendshipId>,
) -> Result<impl IntoResponse, ApiError> {
    respond(state, user.id, id, FriendRequestDecision::Decline).await
}

async fn respond(
    state: AppState,
    user_id: UserId,
    friendship_id: FriendshipId,
    decision: FriendRequestDecision,
) -> Result<impl IntoResponse, ApiError> {
    let friendship = state
        .respond_friend_request_handler()
        .handle(RespondFriendRequestCommand {
            user_id,
            friendship_id,
            decision,
        })
        .await?;
    Ok(Json(friendship))
}

/// DELETE /api/friends/requests/:id
pub async fn cancel_friend_request(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(id): ApiPath<FriendshipId>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .cancel_friend_request_handler()
        .handle(&user.id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
