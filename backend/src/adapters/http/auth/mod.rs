//! Signup, login and current-account endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{AccountResponse, AuthResponse, LoginRequest, SignupRequest};
pub use routes::auth_routes;
