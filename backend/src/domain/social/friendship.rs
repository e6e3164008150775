//! Friend requests and friendships.
//!
//! A pair of users has at most one friendship record regardless of who
//! asked first. Declined records can be reopened by either side.

use serde::Serialize;

use crate::domain::foundation::{
    string_enum, DomainError, ErrorCode, FriendshipId, StateMachine, Timestamp, UserId,
};

string_enum! {
    pub enum FriendshipStatus: "status" {
        Pending => "pending",
        Accepted => "accepted",
        Declined => "declined",
    }
}

impl StateMachine for FriendshipStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use FriendshipStatus::*;
        matches!(
            (self, target),
            (Pending, Accepted) | (Pending, Declined) | (Declined, Pending)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use FriendshipStatus::*;
        match self {
            Pending => vec![Accepted, Declined],
            Declined => vec![Pending],
            Accepted => vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Friendship {
    pub id: FriendshipId,
    pub requester_id: UserId,
    pub addressee_id: UserId,
    pub status: FriendshipStatus,
    pub created_at: Timestamp,
    pub responded_at: Option<Timestamp>,
}

impl Friendship {
    pub fn request(requester_id: UserId, addressee_id: UserId) -> Result<Self, DomainError> {
        if requester_id == addressee_id {
            return Err(DomainError::validation(
                "email",
                "You cannot send a friend request to yourself",
            ));
        }
        Ok(Self {
            id: FriendshipId::new(),
            requester_id,
            addressee_id,
            status: FriendshipStatus::Pending,
            created_at: Timestamp::now(),
            responded_at: None,
        })
    }

    pub fn involves(&self, user: &UserId) -> bool {
        self.requester_id == *user || self.addressee_id == *user
    }

    /// The participant who is not `user`.
    pub fn other_party(&self, user: &UserId) -> UserId {
        if self.requester_id == *user {
            self.addressee_id
        } else {
            self.requester_id
        }
    }

    pub fn accept(&mut self, by: &UserId, at: Timestamp) -> Result<(), DomainError> {
        self.ensure_addressee(by)?;
        self.status = self.status.transition_to(FriendshipStatus::Accepted)?;
        self.responded_at = Some(at);
        Ok(())
    }

    pub fn decline(&mut self, by: &UserId, at: Timestamp) -> Result<(), DomainError> {
        self.ensure_addressee(by)?;
        self.status = self.status.transition_to(FriendshipStatus::Declined)?;
        self.responded_at = Some(at);
        Ok(())
    }

    /// Reopens a declined pair with `requester` asking.
    pub fn reopen(&mut self, requester: UserId, at: Timestamp) -> Result<(), DomainError> {
        if !self.involves(&requester) {
            return Err(not_found());
        }
        self.status = self.status.transition_to(FriendshipStatus::Pending)?;
        self.addressee_id = self.other_party(&requester);
        self.requester_id = requester;
        self.created_at = at;
        self.responded_at = None;
        Ok(())
    }

    /// Only the requester may withdraw a pending request.
    pub fn ensure_cancellable_by(&self, by: &UserId) -> Result<(), DomainError> {
        if self.requester_id != *by {
            return Err(not_found());
        }
        if self.status != FriendshipStatus::Pending {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Only pending requests can be cancelled",
            ));
        }
        Ok(())
    }

    fn ensure_addressee(&self, by: &UserId) -> Result<(), DomainError> {
        if self.addressee_id != *by {
            return Err(not_found());
        }
        Ok(())
    }
}

fn not_found() -> DomainError {
    DomainError::not_found(ErrorCode::NotFound, "Friend request not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cannot_befriend_self() {
        let me = UserId::new();
        assert_eq!(
            Friendship::request(me, me).unwrap_err().code,
            ErrorCode::ValidationFailed
        );
    }

    #[test]
    fn only_addressee_can_accept() {
        let (a, b) = (UserId::new(), UserId::new());
        let mut f = Friendship::request(a, b).unwrap();

        assert_eq!(f.accept(&a, Timestamp::now()).unwrap_err().code, ErrorCode::NotFound);
        f.accept(&b, Timestamp::now()).unwrap();
        assert_eq!(f.status, FriendshipStatus::Accepted);
    }

    #[test]
    fn accepted_cannot_be_declined() {
        let (a, b) = (UserId::new(), UserId::new());
        let mut f = Friendship::request(a, b).unwrap();
        f.accept(&b, Timestamp::now()).unwrap();
        assert_eq!(
            f.decline(&b, Timestamp::now()).unwrap_err().code,
            ErrorCode::InvalidStateTransition
        );
    }

    #[test]
    fn declined_pair_can_be_reopened_by_either_side() {
        let (a, b) = (UserId::new(), UserId::new());
        let mut f = Friendship::request(a, b).unwrap();
        f.decline(&b, Timestamp::now()).unwrap();

        f.reopen(b, Timestamp::now()).unwrap();
        assert_eq!(f.status, FriendshipStatus::Pending);
        assert_eq!(f.requester_id, b);
        assert_eq!(f.addressee_id, a);
    }

    #[test]
    fn only_requester_can_cancel_pending() {
        let (a, b) = (UserId::new(), UserId::new());
        let f = Friendship::request(a, b).unwrap();
        assert!(f.ensure_cancellable_by(&a).is_ok());
        assert!(f.ensure_cancellable_by(&b).is_err());
    }

    #[test]
    fn other_party_is_symmetric() {
        let (a, b) = (UserId::new(), UserId::new());
        let f = Friendship::request(a, b).unwrap();
        assert_eq!(f.other_party(&a), b);
        assert_eq!(f.other_party(&b), a);
    }
}
