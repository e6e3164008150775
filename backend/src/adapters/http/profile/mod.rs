//! Profile and onboarding endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::UpdateProfileRequest;
pub use routes::profile_routes;
