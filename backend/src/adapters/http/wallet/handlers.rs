//! HTTP handlers for the wallet and withdrawals.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::dto::{PageParams, PageResponse, RejectRequest, ReviewQueueParams};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::{ApiJson, ApiPath, ApiQuery};
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::adapters::http::state::AppState;
use crate::application::handlers::wallet::{
    AdjustWalletCommand, ApproveWithdrawalCommand, ListTransactionsQuery, ListWithdrawalsQuery,
    RejectWithdrawalCommand, RequestWithdrawalCommand,
};
use crate::domain::foundation::{PageRequest, WithdrawalId};

use super::dto::{
    AdjustWalletRequest, LedgerEntryResponse, LedgerParams, RequestWithdrawalRequest,
    WalletResponse, WithdrawalRequestResponse, WithdrawalResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Member endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/wallet
pub async fn get_wallet(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let view = state.get_wallet_handler().handle(&user.id).await?;
    Ok(Json(WalletResponse::from(view)))
}

/// GET /api/wallet/transactions
pub async fn list_transactions(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .list_transactions_handler()
        .handle(ListTransactionsQuery {
            user_id: Some(user.id),
            page: params.to_request()?,
        })
        .await?;
    Ok(Json(PageResponse::from_page(page, LedgerEntryResponse::from)))
}

/// GET /api/wallet/withdrawals
pub async fn list_my_withdrawals(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let withdrawals = state.my_withdrawals_handler().handle(&user.id).await?;
    let body: Vec<WithdrawalResponse> = withdrawals.into_iter().map(Into::into).collect();
    Ok(Json(body))
}

/// POST /api/wallet/withdrawals
pub async fn request_withdrawal(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<RequestWithdrawalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .request_withdrawal_handler()
        .handle(RequestWithdrawalCommand {
            user_id: user.id,
            amount_cents: request.amount_cents,
            destination: request.destination,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(WithdrawalRequestResponse::from(result)),
    ))
}

// ════════════════════════════════════════════════════════════════════════════════
// Admin endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/wallet/transactions
pub async fn admin_list_transactions(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ApiQuery(params): ApiQuery<LedgerParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .list_transactions_handler()
        .handle(ListTransactionsQuery {
            user_id: params.user_id,
            page: PageRequest::new(params.page, params.per_page)?,
        })
        .await?;
    Ok(Json(PageResponse::from_page(page, LedgerEntryResponse::from)))
}

/// POST /api/admin/wallet/adjustments
pub async fn adjust_wallet(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiJson(request): ApiJson<AdjustWalletRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = state
        .adjust_wallet_handler()
        .handle(AdjustWalletCommand {
            admin_id: admin.id,
            user_id: request.user_id,
            direction: request.direction,
            amount_cents: request.amount_cents,
            description: request.description,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(LedgerEntryResponse::from(entry))))
}

/// GET /api/admin/withdrawals
pub async fn admin_list_withdrawals(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ApiQuery(params): ApiQuery<ReviewQueueParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .list_withdrawals_handler()
        .handle(ListWithdrawalsQuery {
            status: params.status,
            page: params.to_request()?,
        })
        .await?;
    Ok(Json(PageResponse::from_page(page, WithdrawalResponse::from)))
}

/// POST /api/admin/withdrawals/:id/approve
pub async fn approve_withdrawal(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiPath(id): ApiPath<WithdrawalId>,
) -> Result<impl IntoResponse, ApiError> {
    let withdrawal = state
        .approve_withdrawal_handler()
        .handle(ApproveWithdrawalCommand {
            withdrawal_id: id,
            admin_id: admin.id,
        })
        .await?;
    Ok(Json(WithdrawalResponse::from(withdrawal)))
}

/// POST /api/admin/withdrawals/:id/reject
pub async fn reject_withdrawal(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiPath(id): ApiPath<WithdrawalId>,
    ApiJson(request): ApiJson<RejectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let withdrawal = state
        .reject_withdrawal_handler()
        .handle(RejectWithdrawalCommand {
            withdrawal_id: id,
            admin_id: admin.id,
            reason: request.reason,
        })
        .await?;
    Ok(Json(WithdrawalResponse::from(withdrawal)))
}
