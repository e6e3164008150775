//! LogWorkoutHandler - Command handler for recording a training session.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::tracking::{Exercise, Workout};
use crate::ports::WorkoutRepository;

/// Unvalidated exercise as submitted by the client.
#[derive(Debug, Clone)]
pub struct ExerciseInput {
    pub name: String,
    pub sets: i32,
    pub reps: i32,
    pub weight_kg: Option<f64>,
    pub duration_seconds: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct LogWorkoutCommand {
    pub user_id: UserId,
    pub title: String,
    pub performed_at: Option<Timestamp>,
    pub duration_minutes: i32,
    pub notes: Option<String>,
    pub exercises: Vec<ExerciseInput>,
}

pub struct LogWorkoutHandler {
    workouts: Arc<dyn WorkoutRepository>,
}

impl LogWorkoutHandler {
    pub fn new(workouts: Arc<dyn WorkoutRepository>) -> Self {
        Self { workouts }
    }

    pub async fn handle(&self, cmd: LogWorkoutCommand) -> Result<Workout, DomainError> {
        let exercises = cmd
            .exercises
            .iter()
            .map(|e| Exercise::new(&e.name, e.sets, e.reps, e.weight_kg, e.duration_seconds))
            .collect::<Result<Vec<_>, _>>()?;

        let workout = Workout::log(
            cmd.user_id,
            &cmd.title,
            cmd.performed_at,
            cmd.duration_minutes,
            cmd.notes.as_deref(),
            exercises,
            Timestamp::now(),
        )?;
        self.workouts.save(&workout).await?;

        tracing::debug!(user_id = %workout.user_id, workout_id = %workout.id, "workout logged");
        Ok(workout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support;
    use crate::domain::foundation::ErrorCode;

    fn bench(weight: f64) -> ExerciseInput {
        ExerciseInput {
            name: "Bench press".to_string(),
            sets: 3,
            reps: 8,
            weight_kg: Some(weight),
            duration_seconds: None,
        }
    }

    fn command(user_id: UserId, exercises: Vec<ExerciseInput>) -> LogWorkoutCommand {
        LogWorkoutCommand {
            user_id,
            title: "Push day".to_string(),
            performed_at: None,
            duration_minutes: 50,
            notes: Some("felt strong".to_string()),
            exercises,
        }
    }

    #[tokio::test]
    async fn logs_and_persists_workout() {
        let store = test_support::store();
        let user = UserId::new();

        let workout = LogWorkoutHandler::new(store.clone())
            .handle(command(user, vec![bench(60.0)]))
            .await
            .unwrap();

        assert_eq!(workout.volume_kg(), 1440.0);
        let stored = store.find(&user, &workout.id).await.unwrap();
        assert_eq!(stored, Some(workout));
    }

    #[tokio::test]
    async fn invalid_exercise_names_the_field() {
        let mut bad = bench(60.0);
        bad.sets = 0;

        let err = LogWorkoutHandler::new(test_support::store())
            .handle(command(UserId::new(), vec![bad]))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field").map(String::as_str), Some("exercises.sets"));
    }

    #[tokio::test]
    async fn empty_exercise_list_is_rejected() {
        let err = LogWorkoutHandler::new(test_support::store())
            .handle(command(UserId::new(), vec![]))
            .await
            .unwrap_err();
        assert_eq!(err.details.get("field").map(String::as_str), Some("exercises"));
    }
}
