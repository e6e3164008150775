//! HTTP handlers for payment submission and review.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::dto::{PageResponse, RejectRequest, ReviewQueueParams};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::{ApiJson, ApiPath, ApiQuery};
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::adapters::http::state::AppState;
use crate::application::handlers::payment::{
    ApprovePaymentCommand, ListPaymentsQuery, RejectPaymentCommand, SubmitPaymentCommand,
};
use crate::domain::foundation::PaymentId;

use super::dto::{ApprovalResponse, PaymentResponse, SubmitPaymentRequest};

/// GET /api/payments
pub async fn list_my_payments(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let payments = state.my_payments_handler().handle(&user.id).await?;
    let body: Vec<PaymentResponse> = payments.into_iter().map(Into::into).collect();
    Ok(Json(body))
}

/// POST /api/payments
pub async fn submit_payment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<SubmitPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state
        .submit_payment_handler()
        .handle(SubmitPaymentCommand {
            user_id: user.id,
            program_id: request.program_id,
            amount_cents: request.amount_cents,
            reference: request.reference,
            receipt_url: request.receipt_url,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(PaymentResponse::from(payment))))
}

/// GET /api/admin/payments
pub async fn admin_list_payments(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ApiQuery(params): ApiQuery<ReviewQueueParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .list_payments_handler()
        .handle(ListPaymentsQuery {
            status: params.status,
            page: params.to_request()?,
        })
        .await?;
    Ok(Json(PageResponse::from_page(page, PaymentResponse::from)))
}

/// POST /api/admin/payments/:id/approve
pub async fn approve_payment(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiPath(id): ApiPath<PaymentId>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .approve_payment_handler()
        .handle(ApprovePaymentCommand {
            payment_id: id,
            admin_id: admin.id,
        })
        .await?;
    Ok(Json(ApprovalResponse::from(result)))
}

/// POST /api/admin/payments/:id/reject
pub async fn reject_payment(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiPath(id): ApiPath<PaymentId>,
    ApiJson(request): ApiJson<RejectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state
        .reject_payment_handler()
        .handle(RejectPaymentCommand {
            payment_id: id,
            admin_id: admin.id,
            reason: request.reason,
        })
        .await?;
    Ok(Json(PaymentResponse::from(payment)))
}
