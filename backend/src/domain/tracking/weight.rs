//! Body-weight log.
//!
//! One entry per user per calendar day; logging again for the same day
//! replaces the earlier value.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::foundation::{optional_text, Timestamp, UserId, ValidationError, WeightEntryId};
use crate::domain::user::{check_range, MAX_WEIGHT_KG, MIN_WEIGHT_KG};

const MAX_NOTE_LEN: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightEntry {
    pub id: WeightEntryId,
    pub user_id: UserId,
    pub weight_kg: f64,
    pub recorded_on: NaiveDate,
    pub note: Option<String>,
    pub created_at: Timestamp,
}

impl WeightEntry {
    /// Validates a new entry. `recorded_on` defaults to `today` and may not be later.
    pub fn log(
        user_id: UserId,
        weight_kg: f64,
        recorded_on: Option<NaiveDate>,
        note: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        check_range("weight_kg", weight_kg, MIN_WEIGHT_KG, MAX_WEIGHT_KG)?;
        let recorded_on = recorded_on.unwrap_or(today);
        if recorded_on > today {
            return Err(ValidationError::invalid_format(
                "recorded_on",
                "cannot be in the future",
            ));
        }
        Ok(Self {
            id: WeightEntryId::new(),
            user_id,
            weight_kg: round_tenth(weight_kg),
            recorded_on,
            note: optional_text("note", note, MAX_NOTE_LEN)?,
            created_at: Timestamp::now(),
        })
    }
}

/// Progress overview computed from a user's entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightSummary {
    pub entries: usize,
    pub start_kg: Option<f64>,
    pub current_kg: Option<f64>,
    pub change_kg: Option<f64>,
    pub lowest_kg: Option<f64>,
    pub highest_kg: Option<f64>,
    pub target_kg: Option<f64>,
    pub remaining_to_target_kg: Option<f64>,
}

impl WeightSummary {
    /// `entries` must be sorted by `recorded_on` ascending.
    pub fn compute(entries: &[WeightEntry], target_kg: Option<f64>) -> Self {
        let start = entries.first().map(|e| e.weight_kg);
        let current = entries.last().map(|e| e.weight_kg);
        let lowest = entries.iter().map(|e| e.weight_kg).reduce(f64::min);
        let highest = entries.iter().map(|e| e.weight_kg).reduce(f64::max);
        let change = start.zip(current).map(|(s, c)| round_tenth(c - s));
        let remaining = current.zip(target_kg).map(|(c, t)| round_tenth(c - t));

        Self {
            entries: entries.len(),
            start_kg: start,
            current_kg: current,
            change_kg: change,
            lowest_kg: lowest,
            highest_kg: highest,
            target_kg,
            remaining_to_target_kg: remaining,
        }
    }
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
