//! Payment submission and review endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ApprovalResponse, PaymentResponse, SubmitPaymentRequest};
pub use routes::{admin_payment_routes, payment_routes};
