//! Training program catalog entry.

use serde::Serialize;

use crate::domain::foundation::{
    bounded_text, optional_text, string_enum, Money, ProgramId, Timestamp, ValidationError,
};

const MAX_TITLE_LEN: usize = 120;
const MAX_DESCRIPTION_LEN: usize = 5000;
const MAX_DURATION_WEEKS: i32 = 104;

string_enum! {
    pub enum ProgramLevel: "level" {
        Beginner => "beginner",
        Intermediate => "intermediate",
        Advanced => "advanced",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub id: ProgramId,
    pub title: String,
    pub description: Option<String>,
    pub level: ProgramLevel,
    pub duration_weeks: i32,
    pub price: Money,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields an admin supplies when creating a program.
#[derive(Debug, Clone)]
pub struct ProgramDraft {
    pub title: String,
    pub description: Option<String>,
    pub level: ProgramLevel,
    pub duration_weeks: i32,
    pub price_cents: i64,
    pub is_active: bool,
}

/// Partial update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProgramUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub level: Option<ProgramLevel>,
    pub duration_weeks: Option<i32>,
    pub price_cents: Option<i64>,
    pub is_active: Option<bool>,
}

impl Program {
    pub fn create(draft: ProgramDraft) -> Result<Self, ValidationError> {
        let now = Timestamp::now();
        validate_duration(draft.duration_weeks)?;
        Ok(Self {
            id: ProgramId::new(),
            title: bounded_text("title", &draft.title, 1, MAX_TITLE_LEN)?,
            description: optional_text(
                "description",
                draft.description.as_deref(),
                MAX_DESCRIPTION_LEN,
            )?,
            level: draft.level,
            duration_weeks: draft.duration_weeks,
            price: Money::from_cents(draft.price_cents)
                .map_err(|_| ValidationError::out_of_range("price_cents", 0, i64::MAX, draft.price_cents))?,
            is_active: draft.is_active,
            created_at: now,
            updated_at: now,
        })
    }

    /// Validates every supplied field before changing any.
    pub fn apply(&mut self, update: ProgramUpdate) -> Result<(), ValidationError> {
        let title = update
            .title
            .as_deref()
            .map(|t| bounded_text("title", t, 1, MAX_TITLE_LEN))
            .transpose()?;
        let description = match update.description.as_deref() {
            Some(d) => Some(optional_text("description", Some(d), MAX_DESCRIPTION_LEN)?),
            None => None,
        };
        if let Some(weeks) = update.duration_weeks {
            validate_duration(weeks)?;
        }
        let price = update
            .price_cents
            .map(|c| {
                Money::from_cents(c)
                    .map_err(|_| ValidationError::out_of_range("price_cents", 0, i64::MAX, c))
            })
            .transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(level) = update.level {
            self.level = level;
        }
        if let Some(weeks) = update.duration_weeks {
            self.duration_weeks = weeks;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(active) = update.is_active {
            self.is_active = active;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

fn validate_duration(weeks: i32) -> Result<(), ValidationError> {
    if !(1..=MAX_DURATION_WEEKS).contains(&weeks) {
        return Err(ValidationError::out_of_range(
            "duration_weeks",
            1,
            MAX_DURATION_WEEKS as i64,
            weeks as i64,
        ));
    }
    Ok(())
}
