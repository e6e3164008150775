//! Weight and workout persistence ports.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, Page, PageRequest, UserId, WeightEntryId, WorkoutId};
use crate::domain::tracking::{WeightEntry, Workout};

#[async_trait]
pub trait WeightRepository: Send + Sync {
    /// Insert the entry, or replace the user's entry for the same day.
    ///
    /// Returns the stored entry; on replacement it keeps the original id.
    async fn upsert(&self, entry: &WeightEntry) -> Result<WeightEntry, DomainError>;

    /// Entries within the inclusive date range, ascending by date.
    async fn list(
        &self,
        user_id: &UserId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<WeightEntry>, DomainError>;

    async fn latest(&self, user_id: &UserId) -> Result<Option<WeightEntry>, DomainError>;

    /// # Errors
    ///
    /// - `NotFound` if the entry doesn't exist or belongs to someone else
    async fn delete(&self, user_id: &UserId, id: &WeightEntryId) -> Result<(), DomainError>;
}

#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    /// Persist a workout with its exercises.
    async fn save(&self, workout: &Workout) -> Result<(), DomainError>;

    /// Returns `None` when missing or owned by another user.
    async fn find(&self, user_id: &UserId, id: &WorkoutId)
        -> Result<Option<Workout>, DomainError>;

    /// Newest first.
    async fn list(&self, user_id: &UserId, page: &PageRequest)
        -> Result<Page<Workout>, DomainError>;

    /// Every workout of the user, newest first.
    async fn list_all(&self, user_id: &UserId) -> Result<Vec<Workout>, DomainError>;

    /// Most recent workouts across the given users.
    async fn recent_for_users(
        &self,
        user_ids: &[UserId],
        limit: u32,
    ) -> Result<Vec<Workout>, DomainError>;

    /// # Errors
    ///
    /// - `NotFound` if the workout doesn't exist or belongs to someone else
    async fn delete(&self, user_id: &UserId, id: &WorkoutId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracking_ports_are_object_safe() {
        fn _weights(_repo: &dyn WeightRepository) {}
        fn _workouts(_repo: &dyn WorkoutRepository) {}
    }
}
