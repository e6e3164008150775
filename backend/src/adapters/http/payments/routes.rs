use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    admin_list_payments, approve_payment, list_my_payments, reject_payment, submit_payment,
};
use crate::adapters::http::state::AppState;

pub fn payment_routes() -> Router<AppState> {
    Router::new().route("/payments", get(list_my_payments).post(submit_payment))
}

/// Mounted under `/admin`.
pub fn admin_payment_routes() -> Router<AppState> {
    Router::new()
        .route("/payments", get(admin_list_payments))
        .route("/payments/:id/approve", post(approve_payment))
        .route("/payments/:id/reject", post(reject_payment))
}
