//! Program catalog, enrollment and program administration endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateProgramRequest, ProgramResponse, UpdateProgramRequest};
pub use routes::{admin_program_routes, program_routes};
