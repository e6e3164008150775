//! Profile repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::Profile;

/// Profiles are created by `AccountRepository::register`; this port only
/// reads and updates them.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError>;

    /// # Errors
    ///
    /// - `UserNotFound` if no profile exists for the user
    async fn update(&self, profile: &Profile) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ProfileRepository) {}
    }
}
