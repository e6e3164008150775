//! Friendship port over the in-memory store.

use async_trait::async_trait;

use super::{newest_first, InMemoryStore};
use crate::domain::foundation::{DomainError, ErrorCode, FriendshipId, UserId};
use crate::domain::social::{Friendship, FriendshipStatus};
use crate::ports::FriendshipRepository;

fn not_found() -> DomainError {
    DomainError::not_found(ErrorCode::NotFound, "Friend request not found")
}

#[async_trait]
impl FriendshipRepository for InMemoryStore {
    async fn find(&self, id: &FriendshipId) -> Result<Option<Friendship>, DomainError> {
        let state = self.state.read().await;
        Ok(state.friendships.iter().find(|f| f.id == *id).cloned())
    }

    async fn find_between(
        &self,
        a: &UserId,
        b: &UserId,
    ) -> Result<Option<Friendship>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .friendships
            .iter()
            .find(|f| f.involves(a) && f.involves(b))
            .cloned())
    }

    async fn insert(&self, friendship: &Friendship) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let exists = state.friendships.iter().any(|f| {
            f.involves(&friendship.requester_id) && f.involves(&friendship.addressee_id)
        });
        if exists {
            return Err(DomainError::conflict("A friendship already exists for this pair"));
        }
        state.friendships.push(friendship.clone());
        Ok(())
    }

    async fn update(&self, friendship: &Friendship) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let existing = state
            .friendships
            .iter_mut()
            .find(|f| f.id == friendship.id)
            .ok_or_else(not_found)?;
        *existing = friendship.clone();
        Ok(())
    }

    async fn delete(&self, id: &FriendshipId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let before = state.friendships.len();
        state.friendships.retain(|f| f.id != *id);
        if state.friendships.len() == before {
            return Err(not_found());
        }
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        status: FriendshipStatus,
    ) -> Result<Vec<Friendship>, DomainError> {
        let state = self.state.read().await;
        let mine: Vec<Friendship> = state
            .friendships
            .iter()
            .filter(|f| f.involves(user_id) && f.status == status)
            .cloned()
            .collect();
        Ok(newest_first(&mine, |f| f.created_at))
    }
}
