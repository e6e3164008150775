use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    adjust_wallet, admin_list_transactions, admin_list_withdrawals, approve_withdrawal,
    get_wallet, list_my_withdrawals, list_transactions, reject_withdrawal, request_withdrawal,
};
use crate::adapters::http::state::AppState;

pub fn wallet_routes() -> Router<AppState> {
    Router::new()
        .route("/wallet", get(get_wallet))
        .route("/wallet/transactions", get(list_transactions))
        .route(
            "/wallet/withdrawals",
            get(list_my_withdrawals).post(request_withdrawal),
        )
}

/// Mounted under `/admin`.
pub fn admin_wallet_routes() -> Router<AppState> {
    Router::new()
        .route("/wallet/transactions", get(admin_list_transactions))
        .route("/wallet/adjustments", post(adjust_wallet))
        .route("/withdrawals", get(admin_list_withdrawals))
        .route("/withdrawals/:id/approve", post(approve_withdrawal))
        .route("/withdrawals/:id/reject", post(reject_withdrawal))
}
