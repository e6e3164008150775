//! Profile and onboarding handlers.

mod complete_onboarding;
mod get_profile;
mod update_profile;

pub use complete_onboarding::CompleteOnboardingHandler;
pub use get_profile::{GetProfileHandler, ProfileView};
pub use update_profile::{UpdateProfileCommand, UpdateProfileHandler};
