//! Query handlers for the social graph.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{DomainError, FriendshipId, Timestamp, UserId};
use crate::domain::social::{Friendship, FriendshipStatus};
use crate::domain::tracking::Workout;
use crate::domain::user::Account;
use crate::ports::{AccountRepository, FriendshipRepository, WorkoutRepository};

pub const ACTIVITY_LIMIT: u32 = 20;

/// Another member as seen from the caller's side of a friendship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FriendView {
    pub friendship_id: FriendshipId,
    pub user_id: UserId,
    pub display_name: String,
    pub email: String,
    pub since: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FriendRequests {
    pub incoming: Vec<FriendView>,
    pub outgoing: Vec<FriendView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FriendActivity {
    pub user_id: UserId,
    pub display_name: String,
    pub workout: Workout,
}

/// Resolves the other party of each friendship, skipping vanished accounts.
async fn views(
    accounts: &dyn AccountRepository,
    me: &UserId,
    friendships: &[Friendship],
) -> Result<Vec<FriendView>, DomainError> {
    let ids: Vec<UserId> = friendships.iter().map(|f| f.other_party(me)).collect();
    let by_id: HashMap<UserId, Account> = accounts
        .find_many(&ids)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

    Ok(friendships
        .iter()
        .filter_map(|f| {
            let other = by_id.get(&f.other_party(me))?;
            Some(FriendView {
                friendship_id: f.id,
                user_id: other.id,
                display_name: other.display_name.clone(),
                email: other.email.as_str().to_string(),
                since: f.responded_at.unwrap_or(f.created_at),
            })
        })
        .collect())
}

pub struct ListFriendsHandler {
    accounts: Arc<dyn AccountRepository>,
    friendships: Arc<dyn FriendshipRepository>,
}

impl ListFriendsHandler {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        friendships: Arc<dyn FriendshipRepository>,
    ) -> Self {
        Self {
            accounts,
            friendships,
        }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<Vec<FriendView>, DomainError> {
        let accepted = self
            .friendships
            .list_for_user(user_id, FriendshipStatus::Accepted)
            .await?;
        views(self.accounts.as_ref(), user_id, &accepted).await
    }
}

pub struct ListFriendRequestsHandler {
    accounts: Arc<dyn AccountRepository>,
    friendships: Arc<dyn FriendshipRepository>,
}

impl ListFriendRequestsHandler {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        friendships: Arc<dyn FriendshipRepository>,
    ) -> Self {
        Self {
            accounts,
            friendships,
        }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<FriendRequests, DomainError> {
        let pending = self
            .friendships
            .list_for_user(user_id, FriendshipStatus::Pending)
            .await?;
        let (incoming, outgoing): (Vec<Friendship>, Vec<Friendship>) =
            pending.into_iter().partition(|f| f.addressee_id == *user_id);

        Ok(FriendRequests {
            incoming: views(self.accounts.as_ref(), user_id, &incoming).await?,
            outgoing: views(self.accounts.as_ref(), user_id, &outgoing).await?,
        })
    }
}

/// Most recent workouts across accepted friends.
pub struct FriendActivityHandler {
    accounts: Arc<dyn AccountRepository>,
    friendships: Arc<dyn FriendshipRepository>,
    workouts: Arc<dyn WorkoutRepository>,
}

impl FriendActivityHandler {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        friendships: Arc<dyn FriendshipRepository>,
        workouts: Arc<dyn WorkoutRepository>,
    ) -> Self {
        Self {
            accounts,
            friendships,
            workouts,
        }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<Vec<FriendActivity>, DomainError> {
        let friends = ListFriendsHandler::new(self.accounts.clone(), self.friendships.clone())
            .handle(user_id)
            .await?;
        if friends.is_empty() {
            return Ok(Vec::new());
        }

        let names: HashMap<UserId, String> = friends
            .iter()
            .map(|f| (f.user_id, f.display_name.clone()))
            .collect();
        let ids: Vec<UserId> = names.keys().copied().collect();
        let workouts = self.workouts.recent_for_users(&ids, ACTIVITY_LIMIT).await?;

        Ok(workouts
            .into_iter()
            .map(|workout| FriendActivity {
                user_id: workout.user_id,
                display_name: names.get(&workout.user_id).cloned().unwrap_or_default(),
                workout,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support;
    use crate::domain::foundation::Role;
    use crate::domain::tracking::Exercise;

    async fn befriend(
        store: &crate::adapters::memory::InMemoryStore,
        a: &Account,
        b: &Account,
        accept: bool,
    ) {
        let mut f = Friendship::request(a.id, b.id).unwrap();
        if accept {
            f.accept(&b.id, Timestamp::now()).unwrap();
        }
        FriendshipRepository::insert(store, &f).await.unwrap();
    }

    fn workout(user: UserId) -> Workout {
        let now = Timestamp::now();
        Workout::log(
            user,
            "Intervals",
            None,
            25,
            None,
            vec![Exercise::new("Sprint", 8, 1, None, Some(30)).unwrap()],
            now,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn friends_and_requests_are_listed_from_callers_side() {
        let store = test_support::store();
        let me = test_support::account(&store, "me@example.com", Role::Member).await;
        let pal = test_support::account(&store, "pal@example.com", Role::Member).await;
        let fan = test_support::account(&store, "fan@example.com", Role::Member).await;
        let idol = test_support::account(&store, "idol@example.com", Role::Member).await;
        befriend(&store, &pal, &me, true).await;
        befriend(&store, &fan, &me, false).await;
        befriend(&store, &me, &idol, false).await;

        let friends = ListFriendsHandler::new(store.clone(), store.clone())
            .handle(&me.id)
            .await
            .unwrap();
        assert_eq!(friends.len(), 1);
        assert_eq!(friends[0].user_id, pal.id);

        let requests = ListFriendRequestsHandler::new(store.clone(), store.clone())
            .handle(&me.id)
            .await
            .unwrap();
        assert_eq!(requests.incoming[0].user_id, fan.id);
        assert_eq!(requests.outgoing[0].user_id, idol.id);
    }

    #[tokio::test]
    async fn activity_shows_only_accepted_friends_workouts() {
        let store = test_support::store();
        let me = test_support::account(&store, "me@example.com", Role::Member).await;
        let pal = test_support::account(&store, "pal@example.com", Role::Member).await;
        let stranger = test_support::account(&store, "x@example.com", Role::Member).await;
        befriend(&store, &me, &pal, true).await;

        WorkoutRepository::save(store.as_ref(), &workout(pal.id)).await.unwrap();
        WorkoutRepository::save(store.as_ref(), &workout(stranger.id)).await.unwrap();
        WorkoutRepository::save(store.as_ref(), &workout(me.id)).await.unwrap();

        let activity = FriendActivityHandler::new(store.clone(), store.clone(), store.clone())
            .handle(&me.id)
            .await
            .unwrap();
        assert_eq!(activity.len(), 1);
        assert_eq!(activity[0].user_id, pal.id);
        assert_eq!(activity[0].display_name, "pal");
    }
}
