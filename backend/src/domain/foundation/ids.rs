//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a user account.
    UserId
);
uuid_id!(
    /// Unique identifier for a training program.
    ProgramId
);
uuid_id!(
    /// Unique identifier for a program enrollment.
    EnrollmentId
);
uuid_id!(
    /// Unique identifier for a submitted payment.
    PaymentId
);
uuid_id!(
    /// Unique identifier for a body-weight entry.
    WeightEntryId
);
uuid_id!(
    /// Unique identifier for a logged workout.
    WorkoutId
);
uuid_id!(
    /// Unique identifier for an immutable wallet ledger entry.
    LedgerEntryId
);
uuid_id!(
    /// Unique identifier for a withdrawal request.
    WithdrawalId
);
uuid_id!(
    /// Unique identifier for a referral record.
    ReferralId
);
uuid_id!(
    /// Unique identifier for a friendship or friend request.
    FriendshipId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_generates_unique_values() {
        assert_ne!(UserId::new(), UserId::new());
    }

    #[test]
    fn payment_id_parses_from_valid_string() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: PaymentId = uuid_str.parse().unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }

    #[test]
    fn program_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<ProgramId>().is_err());
    }

    #[test]
    fn ledger_entry_id_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        let id = LedgerEntryId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn ids_serialize_transparently() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: WithdrawalId = uuid_str.parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid_str));
    }
}
