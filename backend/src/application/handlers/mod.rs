//! Application handlers.
//!
//! Command and query handlers grouped by feature area.

pub mod admin;
pub mod auth;
pub mod payment;
pub mod profile;
pub mod program;
pub mod referral;
pub mod social;
pub mod tracking;
pub mod wallet;

#[cfg(test)]
pub(crate) mod test_support;
