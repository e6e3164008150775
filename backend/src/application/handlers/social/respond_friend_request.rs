//! Command handlers for answering and withdrawing friend requests.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, FriendshipId, Timestamp, UserId};
use crate::domain::social::{Friendship, FriendshipStatus};
use crate::ports::FriendshipRepository;

pub(crate) fn request_not_found() -> DomainError {
    DomainError::not_found(ErrorCode::NotFound, "Friend request not found")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendRequestDecision {
    Accept,
    Decline,
}

#[derive(Debug, Clone)]
pub struct RespondFriendRequestCommand {
    pub user_id: UserId,
    pub friendship_id: FriendshipId,
    pub decision: FriendRequestDecision,
}

/// Only the addressee may answer, and only while the request is pending.
pub struct RespondFriendRequestHandler {
    friendships: Arc<dyn FriendshipRepository>,
}

impl RespondFriendRequestHandler {
    pub fn new(friendships: Arc<dyn FriendshipRepository>) -> Self {
        Self { friendships }
    }

    pub async fn handle(&self, cmd: RespondFriendRequestCommand) -> Result<Friendship, DomainError> {
        let mut friendship = self
            .friendships
            .find(&cmd.friendship_id)
            .await?
            .ok_or_else(request_not_found)?;

        let now = Timestamp::now();
        match cmd.decision {
            FriendRequestDecision::Accept => friendship.accept(&cmd.user_id, now)?,
            FriendRequestDecision::Decline => friendship.decline(&cmd.user_id, now)?,
        }
        self.friendships.update(&friendship).await?;
        Ok(friendship)
    }
}

/// The requester withdraws a pending request.
pub struct CancelFriendRequestHandler {
    friendships: Arc<dyn FriendshipRepository>,
}

impl CancelFriendRequestHandler {
    pub fn new(friendships: Arc<dyn FriendshipRepository>) -> Self {
        Self { friendships }
    }

    pub async fn handle(&self, user_id: &UserId, id: &FriendshipId) -> Result<(), DomainError> {
        let friendship = self
            .friendships
            .find(id)
            .await?
            .ok_or_else(request_not_found)?;
        friendship.ensure_cancellable_by(user_id)?;
        self.friendships.delete(id).await
    }
}

/// Ends an accepted friendship from either side.
pub struct RemoveFriendHandler {
    friendships: Arc<dyn FriendshipRepository>,
}

impl RemoveFriendHandler {
    pub fn new(friendships: Arc<dyn FriendshipRepository>) -> Self {
        Self { friendships }
    }

    pub async fn handle(&self, user_id: &UserId, friend_id: &UserId) -> Result<(), DomainError> {
        let friendship = self
            .friendships
            .find_between(user_id, friend_id)
            .await?
            .filter(|f| f.status == FriendshipStatus::Accepted)
            .ok_or_else(|| DomainError::not_found(ErrorCode::NotFound, "Friend not found"))?;
        self.friendships.delete(&friendship.id).await
    }
}
