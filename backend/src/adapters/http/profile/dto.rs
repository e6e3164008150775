//! HTTP DTOs for profile endpoints.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::user::{ActivityLevel, FitnessGoal, Gender, ProfilePatch};

/// Partial profile update. Omitted fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub height_cm: Option<f64>,
    pub target_weight_kg: Option<f64>,
    pub fitness_goal: Option<FitnessGoal>,
    pub activity_level: Option<ActivityLevel>,
}

impl From<UpdateProfileRequest> for ProfilePatch {
    fn from(request: UpdateProfileRequest) -> Self {
        Self {
            full_name: request.full_name,
            gender: request.gender,
            birth_date: request.birth_date,
            height_cm: request.height_cm,
            target_weight_kg: request.target_weight_kg,
            fitness_goal: request.fitness_goal,
            activity_level: request.activity_level,
        }
    }
}
