//! Weight and workout tracking handlers.

mod delete_weight;
mod delete_workout;
mod get_workouts;
mod list_weights;
mod log_weight;
mod log_workout;
mod weight_summary;
mod workout_stats;

pub use delete_weight::DeleteWeightHandler;
pub use delete_workout::DeleteWorkoutHandler;
pub use get_workouts::{GetWorkoutHandler, ListWorkoutsHandler};
pub use list_weights::{ListWeightsHandler, ListWeightsQuery};
pub use log_weight::{LogWeightCommand, LogWeightHandler};
pub use log_workout::{ExerciseInput, LogWorkoutCommand, LogWorkoutHandler};
pub use weight_summary::WeightSummaryHandler;
pub use workout_stats::WorkoutStatsHandler;
