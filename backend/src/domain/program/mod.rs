//! Program catalog and enrollments.

mod enrollment;
mod program;

pub use enrollment::{Enrollment, EnrollmentView};
pub use program::{Program, ProgramDraft, ProgramLevel, ProgramUpdate};
