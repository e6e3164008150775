//! SendFriendRequestHandler - Command handler for inviting another member.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{DomainError, Email, ErrorCode, Timestamp, UserId};
use crate::domain::social::{Friendship, FriendshipStatus};
use crate::ports::{AccountRepository, FriendshipRepository};

#[derive(Debug, Clone)]
pub struct SendFriendRequestCommand {
    pub user_id: UserId,
    pub email: String,
}

/// What sending a request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendRequestOutcome {
    /// A new pending request.
    Sent,
    /// The other member had already asked; the pair are now friends.
    Accepted,
    /// A previously declined pair was asked again.
    Reopened,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendFriendRequestResult {
    pub outcome: FriendRequestOutcome,
    pub friendship: Friendship,
}

pub struct SendFriendRequestHandler {
    accounts: Arc<dyn AccountRepository>,
    friendships: Arc<dyn FriendshipRepository>,
}

impl SendFriendRequestHandler {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        friendships: Arc<dyn FriendshipRepository>,
    ) -> Self {
        Self {
            accounts,
            friendships,
        }
    }

    pub async fn handle(
        &self,
        cmd: SendFriendRequestCommand,
    ) -> Result<SendFriendRequestResult, DomainError> {
        let email = Email::parse(&cmd.email)?;
        let target = self
            .accounts
            .find_by_email(&email)
            .await?
            .filter(|a| a.is_active)
            .ok_or_else(|| DomainError::not_found(ErrorCode::NotFound, "User not found"))?;

        // Also rejects requests to oneself.
        let fresh = Friendship::request(cmd.user_id, target.id)?;
        let now = Timestamp::now();

        let (outcome, friendship) = match self.friendships.find_between(&cmd.user_id, &target.id).await? {
            None => {
                self.friendships.insert(&fresh).await?;
                (FriendRequestOutcome::Sent, fresh)
            }
            Some(existing) => match existing.status {
                FriendshipStatus::Accepted => {
                    return Err(DomainError::conflict("You are already friends"));
                }
                FriendshipStatus::Pending if existing.requester_id == cmd.user_id => {
                    return Err(DomainError::conflict("Friend request already sent"));
                }
                FriendshipStatus::Pending => {
                    let mut friendship = existing;
                    friendship.accept(&cmd.user_id, now)?;
                    self.friendships.update(&friendship).await?;
                    (FriendRequestOutcome::Accepted, friendship)
                }
                FriendshipStatus::Declined => {
                    let mut friendship = existing;
                    friendship.reopen(cmd.user_id, now)?;
                    self.friendships.update(&friendship).await?;
                    (FriendRequestOutcome::Reopened, friendship)
                }
            },
        };

        tracing::debug!(
            friendship_id = %friendship.id,
            outcome = ?outcome,
            "friend request sent"
        );
        Ok(SendFriendRequestResult {
            outcome,
            friendship,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::test_support;
    use crate::domain::foundation::Role;

    fn handler(store: &Arc<InMemoryStore>) -> SendFriendRequestHandler {
        SendFriendRequestHandler::new(store.clone(), store.clone())
    }

    fn to(user_id: UserId, email: &str) -> SendFriendRequestCommand {
        SendFriendRequestCommand {
            user_id,
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn new_request_is_pending_and_duplicate_conflicts() {
        let store = test_support::store();
        let alice = test_support::account(&store, "alice@example.com", Role::Member).await;
        test_support::account(&store, "bob@example.com", Role::Member).await;
        let handler = handler(&store);

        let sent = handler.handle(to(alice.id, "Bob@Example.com")).await.unwrap();
        assert_eq!(sent.outcome, FriendRequestOutcome::Sent);
        assert_eq!(sent.friendship.status, FriendshipStatus::Pending);

        let err = handler.handle(to(alice.id, "bob@example.com")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn reverse_pending_request_is_accepted() {
        let store = test_support::store();
        let alice = test_support::account(&store, "alice@example.com", Role::Member).await;
        let bob = test_support::account(&store, "bob@example.com", Role::Member).await;
        let handler = handler(&store);

        handler.handle(to(alice.id, "bob@example.com")).await.unwrap();
        let result = handler.handle(to(bob.id, "alice@example.com")).await.unwrap();

        assert_eq!(result.outcome, FriendRequestOutcome::Accepted);
        assert_eq!(result.friendship.status, FriendshipStatus::Accepted);

        let err = handler.handle(to(alice.id, "bob@example.com")).await.unwrap_err();
        assert_eq!(err.message, "You are already friends");
    }

    #[tokio::test]
    async fn declined_pair_can_be_asked_again() {
        let store = test_support::store();
        let alice = test_support::account(&store, "alice@example.com", Role::Member).await;
        let bob = test_support::account(&store, "bob@example.com", Role::Member).await;
        let handler = handler(&store);

        let sent = handler.handle(to(alice.id, "bob@example.com")).await.unwrap();
        let mut declined = sent.friendship;
        declined.decline(&bob.id, Timestamp::now()).unwrap();
        FriendshipRepository::update(store.as_ref(), &declined)
            .await
            .unwrap();

        let again = handler.handle(to(bob.id, "alice@example.com")).await.unwrap();
        assert_eq!(again.outcome, FriendRequestOutcome::Reopened);
        assert_eq!(again.friendship.requester_id, bob.id);
        assert_eq!(again.friendship.addressee_id, alice.id);
    }

    #[tokio::test]
    async fn self_and_unknown_targets_are_rejected() {
        let store = test_support::store();
        let alice = test_support::account(&store, "alice@example.com", Role::Member).await;
        let handler = handler(&store);

        let own = handler.handle(to(alice.id, "alice@example.com")).await.unwrap_err();
        assert_eq!(own.code, ErrorCode::ValidationFailed);

        let ghost = handler.handle(to(alice.id, "ghost@example.com")).await.unwrap_err();
        assert_eq!(ghost.code, ErrorCode::NotFound);
    }
}
