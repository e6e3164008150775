//! Program catalog, enrollment and access handlers.
//!
//! Enrollments are never created here; see payment approval.

mod enrollments;
mod list_programs;
mod manage_programs;

pub use enrollments::{CheckProgramAccessHandler, ListEnrollmentsHandler, ProgramAccess};
pub(crate) use list_programs::program_not_found;
pub use list_programs::{CatalogScope, GetProgramHandler, ListProgramsHandler};
pub use manage_programs::{CreateProgramHandler, UpdateProgramCommand, UpdateProgramHandler};
