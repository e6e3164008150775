//! Payment submission and review.

mod aggregate;

pub use aggregate::{already_reviewed, Payment, MAX_REASON_LEN};
