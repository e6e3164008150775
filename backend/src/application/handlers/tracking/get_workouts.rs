//! Query handlers for the caller's workouts.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Page, PageRequest, UserId, WorkoutId};
use crate::domain::tracking::Workout;
use crate::ports::WorkoutRepository;

/// Newest first.
pub struct ListWorkoutsHandler {
    workouts: Arc<dyn WorkoutRepository>,
}

impl ListWorkoutsHandler {
    pub fn new(workouts: Arc<dyn WorkoutRepository>) -> Self {
        Self { workouts }
    }

    pub async fn handle(
        &self,
        user_id: &UserId,
        page: &PageRequest,
    ) -> Result<Page<Workout>, DomainError> {
        self.workouts.list(user_id, page).await
    }
}

pub struct GetWorkoutHandler {
    workouts: Arc<dyn WorkoutRepository>,
}

impl GetWorkoutHandler {
    pub fn new(workouts: Arc<dyn WorkoutRepository>) -> Self {
        Self { workouts }
    }

    pub async fn handle(&self, user_id: &UserId, id: &WorkoutId) -> Result<Workout, DomainError> {
        self.workouts
            .find(user_id, id)
            .await?
            .ok_or_else(|| DomainError::not_found(ErrorCode::NotFound, "Workout not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support;
    use crate::domain::foundation::Timestamp;
    use crate::domain::tracking::Exercise;

    fn workout(user: UserId, minutes_ago: i64) -> Workout {
        let now = Timestamp::now();
        Workout::log(
            user,
            "Run",
            Some(now.add_minutes(-minutes_ago)),
            30,
            None,
            vec![Exercise::new("Easy run", 1, 0, None, Some(1800)).unwrap()],
            now,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn list_is_paged_newest_first() {
        let store = test_support::store();
        let user = UserId::new();
        let older = workout(user, 120);
        let newer = workout(user, 10);
        store.save(&older).await.unwrap();
        store.save(&newer).await.unwrap();

        let page = ListWorkoutsHandler::new(store)
            .handle(&user, &PageRequest::new(Some(1), Some(1)).unwrap())
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items[0].id, newer.id);
    }

    #[tokio::test]
    async fn other_users_workout_is_not_found() {
        let store = test_support::store();
        let w = workout(UserId::new(), 5);
        store.save(&w).await.unwrap();

        let err = GetWorkoutHandler::new(store)
            .handle(&UserId::new(), &w.id)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
