//! Weight and workout endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ExerciseRequest, LogWeightRequest, LogWorkoutRequest, WeightRangeParams};
pub use routes::tracking_routes;
