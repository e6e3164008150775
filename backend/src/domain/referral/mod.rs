//! Referral program: codes and referral records.

mod code;
mod aggregate;

pub use code::{ReferralCode, CODE_LENGTH};
pub use aggregate::Referral;
