//! Payment submission and review handlers.

mod approve_payment;
mod list_payments;
mod reject_payment;
mod submit_payment;

pub use approve_payment::{ApprovePaymentCommand, ApprovePaymentHandler, ApprovePaymentResult};
pub use list_payments::{ListMyPaymentsHandler, ListPaymentsHandler, ListPaymentsQuery};
pub use reject_payment::{RejectPaymentCommand, RejectPaymentHandler};
pub use submit_payment::{SubmitPaymentCommand, SubmitPaymentHandler};
