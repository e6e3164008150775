//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the FitPass domain.

mod auth;
mod email;
mod errors;
mod ids;
mod money;
mod pagination;
mod review_status;
mod state_machine;
mod string_enum;
mod text;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, Role};
pub use email::Email;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    EnrollmentId, FriendshipId, LedgerEntryId, PaymentId, ProgramId, ReferralId, UserId,
    WeightEntryId, WithdrawalId, WorkoutId,
};
pub use money::Money;
pub use pagination::{Page, PageRequest, DEFAULT_PER_PAGE, MAX_PER_PAGE};
pub use review_status::ReviewStatus;
pub use state_machine::StateMachine;
pub(crate) use string_enum::string_enum;
pub use text::{bounded_text, optional_text};
pub use timestamp::Timestamp;
