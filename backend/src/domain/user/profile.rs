//! Member profile and onboarding.
//!
//! Every account owns exactly one profile, created empty at signup.
//! Onboarding is complete once the fields needed for plan
//! recommendations are present.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::foundation::{
    optional_text, string_enum, DomainError, Timestamp, UserId, ValidationError,
};

pub const MIN_HEIGHT_CM: f64 = 50.0;
pub const MAX_HEIGHT_CM: f64 = 272.0;
pub const MIN_WEIGHT_KG: f64 = 20.0;
pub const MAX_WEIGHT_KG: f64 = 500.0;
pub const MIN_AGE_YEARS: u32 = 13;
const MAX_FULL_NAME_LEN: usize = 120;

string_enum! {
    pub enum Gender: "gender" {
        Male => "male",
        Female => "female",
        Other => "other",
    }
}

string_enum! {
    pub enum FitnessGoal: "fitness_goal" {
        LoseWeight => "lose_weight",
        BuildMuscle => "build_muscle",
        Maintain => "maintain",
        ImproveEndurance => "improve_endurance",
    }
}

string_enum! {
    pub enum ActivityLevel: "activity_level" {
        Sedentary => "sedentary",
        Light => "light",
        Moderate => "moderate",
        Active => "active",
        VeryActive => "very_active",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub user_id: UserId,
    pub full_name: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub height_cm: Option<f64>,
    pub target_weight_kg: Option<f64>,
    pub fitness_goal: Option<FitnessGoal>,
    pub activity_level: Option<ActivityLevel>,
    pub onboarding_completed: bool,
    pub updated_at: Timestamp,
}

/// Partial update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub full_name: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub height_cm: Option<f64>,
    pub target_weight_kg: Option<f64>,
    pub fitness_goal: Option<FitnessGoal>,
    pub activity_level: Option<ActivityLevel>,
}

impl Profile {
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            full_name: None,
            gender: None,
            birth_date: None,
            height_cm: None,
            target_weight_kg: None,
            fitness_goal: None,
            activity_level: None,
            onboarding_completed: false,
            updated_at: Timestamp::now(),
        }
    }

    /// Validates and applies a patch. Nothing changes if any field is invalid.
    pub fn apply(&mut self, patch: ProfilePatch, today: NaiveDate) -> Result<(), ValidationError> {
        let full_name = match patch.full_name.as_deref() {
            Some(name) => optional_text("full_name", Some(name), MAX_FULL_NAME_LEN)?,
            None => self.full_name.clone(),
        };
        if let Some(birth_date) = patch.birth_date {
            validate_birth_date(birth_date, today)?;
        }
        if let Some(height) = patch.height_cm {
            check_range("height_cm", height, MIN_HEIGHT_CM, MAX_HEIGHT_CM)?;
        }
        if let Some(target) = patch.target_weight_kg {
            check_range("target_weight_kg", target, MIN_WEIGHT_KG, MAX_WEIGHT_KG)?;
        }

        self.full_name = full_name;
        self.gender = patch.gender.or(self.gender);
        self.birth_date = patch.birth_date.or(self.birth_date);
        self.height_cm = patch.height_cm.or(self.height_cm);
        self.target_weight_kg = patch.target_weight_kg.or(self.target_weight_kg);
        self.fitness_goal = patch.fitness_goal.or(self.fitness_goal);
        self.activity_level = patch.activity_level.or(self.activity_level);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Names of fields that must be set before onboarding can complete.
    pub fn missing_onboarding_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.gender.is_none() {
            missing.push("gender");
        }
        if self.birth_date.is_none() {
            missing.push("birth_date");
        }
        if self.height_cm.is_none() {
            missing.push("height_cm");
        }
        if self.fitness_goal.is_none() {
            missing.push("fitness_goal");
        }
        if self.activity_level.is_none() {
            missing.push("activity_level");
        }
        missing
    }

    /// Marks onboarding complete. Idempotent.
    pub fn complete_onboarding(&mut self) -> Result<(), DomainError> {
        if self.onboarding_completed {
            return Ok(());
        }
        let missing = self.missing_onboarding_fields();
        if !missing.is_empty() {
            return Err(
                DomainError::validation("profile", "Profile is missing required onboarding fields")
                    .with_detail("missing_fields", missing.join(",")),
            );
        }
        self.onboarding_completed = true;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Age in whole years on `today`.
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        self.birth_date.and_then(|b| years_between(b, today))
    }

    /// Body mass index from the stored height and the given weight, one decimal.
    pub fn bmi(&self, weight_kg: f64) -> Option<f64> {
        let height_m = self.height_cm? / 100.0;
        if height_m <= 0.0 {
            return None;
        }
        Some((weight_kg / (height_m * height_m) * 10.0).round() / 10.0)
    }
}

fn years_between(birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    if birth > today {
        return None;
    }
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

fn validate_birth_date(birth: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    if birth >= today {
        return Err(ValidationError::invalid_format("birth_date", "must be in the past"));
    }
    match years_between(birth, today) {
        Some(age) if age >= MIN_AGE_YEARS => Ok(()),
        _ => Err(ValidationError::invalid_format(
            "birth_date",
            format!("members must be at least {} years old", MIN_AGE_YEARS),
        )),
    }
}

pub(crate) fn check_range(
    field: &str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ValidationError> {
    if !value.is_finite() || value < min || value > max {
        return Err(ValidationError::invalid_format(
            field,
            format!("must be between {} and {}", min, max),
        ));
    }
    Ok(())
}
