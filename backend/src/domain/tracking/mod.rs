//! Weight and workout tracking.

mod weight;
mod workout;

pub use weight::{WeightEntry, WeightSummary};
pub use workout::{Exercise, Workout, WorkoutStats};
