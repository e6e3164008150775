//! Friend list, friend requests and the friends' workout feed.

mod handlers;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::adapters::http::state::AppState;
use handlers::{
    accept_friend_request, cancel_friend_request, decline_friend_request, friend_activity,
    list_friend_requests, list_friends, remove_friend, send_friend_request,
};

pub use handlers::SendFriendRequestRequest;

pub fn friend_routes() -> Router<AppState> {
    Router::new()
        .route("/friends", get(list_friends))
        .route("/friends/activity", get(friend_activity))
        .route(
            "/friends/requests",
            get(list_friend_requests).post(send_friend_request),
        )
        .route("/friends/requests/:id", delete(cancel_friend_request))
        .route("/friends/requests/:id/accept", post(accept_friend_request))
        .route("/friends/requests/:id/decline", post(decline_friend_request))
        .route("/friends/:user_id", delete(remove_friend))
}
