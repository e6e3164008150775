//! Money in cents.
//!
//! Amounts are whole cents held in an `i64` and can never be negative.
//! Arithmetic is checked; a subtraction that would go below zero yields `None`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Non-negative amount of money in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates an amount, rejecting negative values.
    pub fn from_cents(cents: i64) -> Result<Self, ValidationError> {
        if cents < 0 {
            return Err(ValidationError::out_of_range("amount_cents", 0, i64::MAX, cents));
        }
        Ok(Self(cents))
    }

    /// Creates a strictly positive amount.
    pub fn positive(field: &str, cents: i64) -> Result<Self, ValidationError> {
        if cents <= 0 {
            return Err(ValidationError::out_of_range(field, 1, i64::MAX, cents));
        }
        Ok(Self(cents))
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Subtracts, returning `None` when the result would be negative.
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        match self.0.checked_sub(other.0) {
            Some(v) if v >= 0 => Some(Money(v)),
            _ => None,
        }
    }

    /// `floor(self * percent / 100)`, computed in 128 bits.
    pub fn percent_floor(self, percent: u8) -> Money {
        let scaled = (self.0 as i128 * percent as i128) / 100;
        Money(scaled as i64)
    }
}

impl TryFrom<i64> for Money {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Money::from_cents(value)
    }
}

impl From<Money> for i64 {
    fn from(m: Money) -> Self {
        m.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
