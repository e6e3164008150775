//! User domain: accounts and profiles.

mod account;
mod profile;

pub use account::{Account, MAX_DISPLAY_NAME_LEN, MAX_PASSWORD_LEN, MIN_PASSWORD_LEN};
pub(crate) use profile::check_range;
pub use profile::{
    ActivityLevel, FitnessGoal, Gender, Profile, ProfilePatch, MAX_HEIGHT_CM, MAX_WEIGHT_KG,
    MIN_AGE_YEARS, MIN_HEIGHT_CM, MIN_WEIGHT_KG,
};
