//! WorkoutStatsHandler - Query handler for training totals and streaks.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::tracking::WorkoutStats;
use crate::ports::WorkoutRepository;

pub struct WorkoutStatsHandler {
    workouts: Arc<dyn WorkoutRepository>,
}

impl WorkoutStatsHandler {
    pub fn new(workouts: Arc<dyn WorkoutRepository>) -> Self {
        Self { workouts }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<WorkoutStats, DomainError> {
        let workouts = self.workouts.list_all(user_id).await?;
        Ok(WorkoutStats::compute(&workouts, Timestamp::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support;
    use crate::domain::tracking::{Exercise, Workout};

    #[tokio::test]
    async fn stats_cover_only_the_callers_workouts() {
        let store = test_support::store();
        let me = UserId::new();
        let now = Timestamp::now();
        for (user, minutes) in [(me, 40), (me, 20), (UserId::new(), 90)] {
            let workout = Workout::log(
                user,
                "Lift",
                Some(now.add_minutes(-1)),
                minutes,
                None,
                vec![Exercise::new("Deadlift", 2, 5, Some(100.0), None).unwrap()],
                now,
            )
            .unwrap();
            store.save(&workout).await.unwrap();
        }

        let stats = WorkoutStatsHandler::new(store).handle(&me).await.unwrap();
        assert_eq!(stats.total_workouts, 2);
        assert_eq!(stats.total_minutes, 60);
        assert_eq!(stats.total_volume_kg, 2000.0);
        assert_eq!(stats.workouts_last_7_days, 2);
        assert!(stats.current_streak_days >= 1);
    }
}
