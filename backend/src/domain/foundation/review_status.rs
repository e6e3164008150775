//! Admin review lifecycle shared by payments and withdrawals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{StateMachine, ValidationError};

/// Status of a record awaiting an admin decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

impl StateMachine for ReviewStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ReviewStatus::*;
        matches!((self, target), (Pending, Approved) | (Pending, Rejected))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ReviewStatus::*;
        match self {
            Pending => vec![Approved, Rejected],
            Approved | Rejected => vec![],
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReviewStatus::Pending),
            "approved" => Ok(ReviewStatus::Approved),
            "rejected" => Ok(ReviewStatus::Rejected),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_can_be_approved_or_rejected() {
        assert!(ReviewStatus::Pending.can_transition_to(&ReviewStatus::Approved));
        assert!(ReviewStatus::Pending.can_transition_to(&ReviewStatus::Rejected));
    }

    #[test]
    fn decisions_are_final() {
        assert!(ReviewStatus::Approved.is_terminal());
        assert!(ReviewStatus::Rejected.is_terminal());
        assert!(ReviewStatus::Approved
            .transition_to(ReviewStatus::Rejected)
            .is_err());
    }

    #[test]
    fn parses_database_representation() {
        for status in [ReviewStatus::Pending, ReviewStatus::Approved, ReviewStatus::Rejected] {
            assert_eq!(status.as_str().parse::<ReviewStatus>().unwrap(), status);
        }
        assert!("paid".parse::<ReviewStatus>().is_err());
    }
}
