//! Friendship repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, FriendshipId, UserId};
use crate::domain::social::{Friendship, FriendshipStatus};

#[async_trait]
pub trait FriendshipRepository: Send + Sync {
    async fn find(&self, id: &FriendshipId) -> Result<Option<Friendship>, DomainError>;

    /// The record for the unordered pair, whoever requested.
    async fn find_between(
        &self,
        a: &UserId,
        b: &UserId,
    ) -> Result<Option<Friendship>, DomainError>;

    /// # Errors
    ///
    /// - `Conflict` if a record for the pair already exists
    async fn insert(&self, friendship: &Friendship) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `NotFound` if the record doesn't exist
    async fn update(&self, friendship: &Friendship) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `NotFound` if the record doesn't exist
    async fn delete(&self, id: &FriendshipId) -> Result<(), DomainError>;

    /// Records involving `user_id` with the given status, newest first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        status: FriendshipStatus,
    ) -> Result<Vec<Friendship>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn friendship_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn FriendshipRepository) {}
    }
}
