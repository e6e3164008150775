//! Authentication middleware and extractors for axum.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!              Handler → RequireAuth / RequireAdmin read from extensions
//! ```
//!
//! Requests without a bearer token pass through untouched so public routes
//! share the same router; a token that fails validation is rejected here.

use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::ApiError;
use crate::domain::foundation::{AuthError, AuthenticatedUser, DomainError, ErrorCode};
use crate::ports::SessionValidator;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Validates `Authorization: Bearer <token>` and injects the caller.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(&request) else {
        return next.run(request).await;
    };

    match validator.validate(token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => {
            if !matches!(err, AuthError::ServiceUnavailable(_)) {
                tracing::debug!(error = %err, "rejected bearer token");
            }
            ApiError::from(err).into_response()
        }
    }
}

/// Extractor that requires an authenticated caller.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::Unauthorized, "Authentication required").into()
            })
    }
}

/// Extractor that requires an authenticated admin.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(user) = RequireAuth::from_request_parts(parts, state).await?;
        user.require_admin()?;
        Ok(RequireAdmin(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::domain::foundation::{Role, UserId};
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{middleware, Router};
    use tower::ServiceExt;

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "test@example.com", role)
    }

    fn app(validator: MockSessionValidator) -> Router {
        let state: AuthState = Arc::new(validator);
        Router::new()
            .route("/public", get(|| async { "ok" }))
            .route(
                "/member",
                get(|RequireAuth(u): RequireAuth| async move { u.email }),
            )
            .route("/admin", get(|_: RequireAdmin| async { "admin" }))
            .layer(middleware::from_fn_with_state(state, auth_middleware))
    }

    async fn status(app: Router, uri: &str, token: Option<&str>) -> StatusCode {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        app.oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn public_route_needs_no_token() {
        let app = app(MockSessionValidator::new());
        assert_eq!(status(app, "/public", None).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn protected_route_requires_token() {
        let app = app(MockSessionValidator::new().with_user("good", user(Role::Member)));
        assert_eq!(status(app.clone(), "/member", None).await, StatusCode::UNAUTHORIZED);
        assert_eq!(status(app.clone(), "/member", Some("bad")).await, StatusCode::UNAUTHORIZED);
        assert_eq!(status(app, "/member", Some("good")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn admin_route_rejects_members() {
        let app = app(
            MockSessionValidator::new()
                .with_user("member", user(Role::Member))
                .with_user("admin", user(Role::Admin)),
        );
        assert_eq!(status(app.clone(), "/admin", Some("member")).await, StatusCode::FORBIDDEN);
        assert_eq!(status(app, "/admin", Some("admin")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn disabled_account_is_forbidden() {
        let app = app(MockSessionValidator::new().with_error(AuthError::AccountDisabled));
        assert_eq!(status(app, "/member", Some("off")).await, StatusCode::FORBIDDEN);
    }

    #[test]
    fn extractors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthState>();
        assert_send_sync::<RequireAuth>();
        assert_send_sync::<RequireAdmin>();
    }
}
