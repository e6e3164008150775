//! DeleteWorkoutHandler - Command handler for removing a workout.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId, WorkoutId};
use crate::ports::WorkoutRepository;

pub struct DeleteWorkoutHandler {
    workouts: Arc<dyn WorkoutRepository>,
}

impl DeleteWorkoutHandler {
    pub fn new(workouts: Arc<dyn WorkoutRepository>) -> Self {
        Self { workouts }
    }

    pub async fn handle(&self, user_id: &UserId, id: &WorkoutId) -> Result<(), DomainError> {
        self.workouts.delete(user_id, id).await?;
        tracing::debug!(user_id = %user_id, workout_id = %id, "workout deleted");
        Ok(())
    }
}
