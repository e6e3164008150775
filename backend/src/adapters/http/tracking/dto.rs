//! HTTP DTOs for weight and workout tracking.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::application::handlers::tracking::ExerciseInput;
use crate::domain::foundation::Timestamp;

#[derive(Debug, Clone, Deserialize)]
pub struct LogWeightRequest {
    pub weight_kg: f64,
    #[serde(default)]
    pub recorded_on: Option<NaiveDate>,
    #[serde(default)]
    pub note: Option<String>,
}

/// `?from=YYYY-MM-DD&to=YYYY-MM-DD`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct WeightRangeParams {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseRequest {
    pub name: String,
    pub sets: i32,
    pub reps: i32,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub duration_seconds: Option<i32>,
}

impl From<ExerciseRequest> for ExerciseInput {
    fn from(request: ExerciseRequest) -> Self {
        Self {
            name: request.name,
            sets: request.sets,
            reps: request.reps,
            weight_kg: request.weight_kg,
            duration_seconds: request.duration_seconds,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogWorkoutRequest {
    pub title: String,
    #[serde(default)]
    pub performed_at: Option<Timestamp>,
    pub duration_minutes: i32,
    #[serde(default)]
    pub notes: Option<String>,
    pub exercises: Vec<ExerciseRequest>,
}
