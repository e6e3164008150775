//! Top-level router assembly.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::admin::admin_routes;
use super::auth::auth_routes;
use super::error::expose_internal_errors;
use super::friends::friend_routes;
use super::middleware::auth_middleware;
use super::payments::{admin_payment_routes, payment_routes};
use super::profile::profile_routes;
use super::programs::{admin_program_routes, program_routes};
use super::referrals::referral_routes;
use super::state::AppState;
use super::tracking::tracking_routes;
use super::wallet::{admin_wallet_routes, wallet_routes};

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Every endpoint under `/api`, plus `/health`.
///
/// Bearer tokens are resolved once by the auth middleware; handlers opt in to
/// authentication through the `RequireAuth`/`RequireAdmin` extractors.
pub fn api_router(state: AppState) -> Router {
    let admin = Router::new()
        .merge(admin_routes())
        .merge(admin_program_routes())
        .merge(admin_payment_routes())
        .merge(admin_wallet_routes());

    let api = Router::new()
        .merge(auth_routes())
        .merge(profile_routes())
        .merge(tracking_routes())
        .merge(program_routes())
        .merge(payment_routes())
        .merge(wallet_routes())
        .merge(referral_routes())
        .merge(friend_routes())
        .nest("/admin", admin);

    let sessions = state.credentials.sessions.clone();
    let verbose = state.policy.verbose_errors;

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(sessions, auth_middleware))
        .layer(middleware::from_fn_with_state(verbose, expose_internal_errors))
        .with_state(state)
}

/// Wraps a router with request tracing, CORS, the body limit and the
/// request timeout.
pub fn with_http_layers(router: Router, server: &ServerConfig) -> Router {
    router
        .layer(DefaultBodyLimit::max(server.body_limit_bytes()))
        .layer(cors_layer(&server.cors_origins()))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[&str]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.is_empty() {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(allowed))
}
