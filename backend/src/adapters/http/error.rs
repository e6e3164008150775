//! HTTP error responses.
//!
//! Every failure leaves the API as `{ "error_code", "message", "details"? }`.
//! Infrastructure messages are replaced by a generic one; the original is
//! attached to the response as [`InternalErrorDetail`] so that
//! [`expose_internal_errors`] can put it back when verbose errors are on.

use std::collections::HashMap;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, DomainError, ErrorCode, ValidationError};

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// JSON error body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error_code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub details: HashMap<String, String>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: HashMap::new(),
        }
    }
}

/// Original message of a hidden infrastructure error.
#[derive(Debug, Clone)]
pub struct InternalErrorDetail(pub String);

#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    Auth(AuthError),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Domain(err.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::Auth(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Domain(DomainError::validation("body", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Domain(DomainError::validation("query", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Domain(DomainError::validation("path", rejection.body_text()))
    }
}

/// HTTP status for a domain error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed | ErrorCode::ReferralInvalid => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound
        | ErrorCode::UserNotFound
        | ErrorCode::ProgramNotFound
        | ErrorCode::PaymentNotFound
        | ErrorCode::WithdrawalNotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict | ErrorCode::EmailTaken | ErrorCode::InvalidStateTransition => {
            StatusCode::CONFLICT
        }
        ErrorCode::InsufficientFunds => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::InvalidCredentials | ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::AccountDisabled | ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn auth_parts(err: &AuthError) -> (StatusCode, &'static str) {
    match err {
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
        AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED"),
        AuthError::UserNotFound => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        AuthError::AccountDisabled => (StatusCode::FORBIDDEN, "ACCOUNT_DISABLED"),
        AuthError::InsufficientPermissions => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        AuthError::ServiceUnavailable(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Domain(err) if err.is_infrastructure() => {
                tracing::error!(code = %err.code, error = %err.message, "request failed");
                let body = ErrorResponse::new(err.code.to_string(), INTERNAL_MESSAGE);
                let mut response = (status_for(err.code), Json(body)).into_response();
                response
                    .extensions_mut()
                    .insert(InternalErrorDetail(err.message));
                response
            }
            ApiError::Domain(err) => {
                let body = ErrorResponse {
                    error_code: err.code.to_string(),
                    message: err.message,
                    details: err.details,
                };
                (status_for(err.code), Json(body)).into_response()
            }
            ApiError::Auth(err) => {
                let (status, code) = auth_parts(&err);
                let message = match &err {
                    AuthError::ServiceUnavailable(detail) => {
                        tracing::error!(error = %detail, "auth service unavailable");
                        "Authentication service unavailable".to_string()
                    }
                    other => other.to_string(),
                };
                (status, Json(ErrorResponse::new(code, message))).into_response()
            }
        }
    }
}

/// Re-inserts hidden infrastructure messages into error bodies.
pub async fn expose_internal_errors(
    State(verbose): State<bool>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if !verbose {
        return response;
    }
    let Some(InternalErrorDetail(detail)) = response.extensions().get::<InternalErrorDetail>().cloned()
    else {
        return response;
    };

    let status = response.status();
    let body = ErrorResponse::new(ErrorCode::InternalError.to_string(), detail);
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: impl Into<ApiError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn domain_codes_map_to_statuses() {
        assert_eq!(
            status_of(DomainError::validation("email", "bad")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DomainError::new(ErrorCode::EmailTaken, "taken")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(DomainError::new(ErrorCode::InsufficientFunds, "low")),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(DomainError::new(ErrorCode::InvalidCredentials, "no")),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(DomainError::new(ErrorCode::AccountDisabled, "off")),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(DomainError::new(ErrorCode::WithdrawalNotFound, "gone")),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn auth_errors_map_to_statuses() {
        assert_eq!(status_of(AuthError::TokenExpired), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(AuthError::AccountDisabled), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(AuthError::service_unavailable("db down")),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn infrastructure_errors_carry_hidden_detail() {
        let response =
            ApiError::from(DomainError::database("insert payment", "relation missing"))
                .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let detail = response.extensions().get::<InternalErrorDetail>().unwrap();
        assert!(detail.0.contains("relation missing"));
    }
}
