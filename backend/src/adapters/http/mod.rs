//! HTTP adapter - the REST API.
//!
//! Each resource lives in its own module with `dto`, `handlers` and `routes`;
//! `router` assembles them under `/api`.

pub mod admin;
pub mod auth;
pub mod dto;
pub mod error;
pub mod extract;
pub mod friends;
pub mod middleware;
pub mod payments;
pub mod profile;
pub mod programs;
pub mod referrals;
pub mod router;
pub mod state;
pub mod tracking;
pub mod wallet;

pub use error::{ApiError, ErrorResponse};
pub use router::{api_router, with_http_layers};
pub use state::{AppState, Credentials, Policy, Store};
