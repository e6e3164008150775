//! Weight and workout ports over the in-memory store.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::{newest_first, InMemoryStore};
use crate::domain::foundation::{
    DomainError, ErrorCode, Page, PageRequest, UserId, WeightEntryId, WorkoutId,
};
use crate::domain::tracking::{WeightEntry, Workout};
use crate::ports::{WeightRepository, WorkoutRepository};

#[async_trait]
impl WeightRepository for InMemoryStore {
    async fn upsert(&self, entry: &WeightEntry) -> Result<WeightEntry, DomainError> {
        let mut state = self.state.write().await;
        if let Some(existing) = state
            .weights
            .iter_mut()
            .find(|e| e.user_id == entry.user_id && e.recorded_on == entry.recorded_on)
        {
            existing.weight_kg = entry.weight_kg;
            existing.note = entry.note.clone();
            return Ok(existing.clone());
        }
        state.weights.push(entry.clone());
        Ok(entry.clone())
    }

    async fn list(
        &self,
        user_id: &UserId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<WeightEntry>, DomainError> {
        let state = self.state.read().await;
        let mut entries: Vec<WeightEntry> = state
            .weights
            .iter()
            .filter(|e| e.user_id == *user_id)
            .filter(|e| from.map_or(true, |f| e.recorded_on >= f))
            .filter(|e| to.map_or(true, |t| e.recorded_on <= t))
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.recorded_on);
        Ok(entries)
    }

    async fn latest(&self, user_id: &UserId) -> Result<Option<WeightEntry>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .weights
            .iter()
            .filter(|e| e.user_id == *user_id)
            .max_by_key(|e| e.recorded_on)
            .cloned())
    }

    async fn delete(&self, user_id: &UserId, id: &WeightEntryId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let before = state.weights.len();
        state
            .weights
            .retain(|e| !(e.id == *id && e.user_id == *user_id));
        if state.weights.len() == before {
            return Err(DomainError::not_found(ErrorCode::NotFound, "Weight entry not found"));
        }
        Ok(())
    }
}

#[async_trait]
impl WorkoutRepository for InMemoryStore {
    async fn save(&self, workout: &Workout) -> Result<(), DomainError> {
        self.state.write().await.workouts.push(workout.clone());
        Ok(())
    }

    async fn find(
        &self,
        user_id: &UserId,
        id: &WorkoutId,
    ) -> Result<Option<Workout>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .workouts
            .iter()
            .find(|w| w.id == *id && w.user_id == *user_id)
            .cloned())
    }

    async fn list(
        &self,
        user_id: &UserId,
        page: &PageRequest,
    ) -> Result<Page<Workout>, DomainError> {
        let all = WorkoutRepository::list_all(self, user_id).await?;
        Ok(Page::from_vec(all, page))
    }

    async fn list_all(&self, user_id: &UserId) -> Result<Vec<Workout>, DomainError> {
        let state = self.state.read().await;
        let mine: Vec<Workout> = state
            .workouts
            .iter()
            .filter(|w| w.user_id == *user_id)
            .cloned()
            .collect();
        Ok(newest_first(&mine, |w| w.performed_at))
    }

    async fn recent_for_users(
        &self,
        user_ids: &[UserId],
        limit: u32,
    ) -> Result<Vec<Workout>, DomainError> {
        let state = self.state.read().await;
        let theirs: Vec<Workout> = state
            .workouts
            .iter()
            .filter(|w| user_ids.contains(&w.user_id))
            .cloned()
            .collect();
        let mut recent = newest_first(&theirs, |w| w.performed_at);
        recent.truncate(limit as usize);
        Ok(recent)
    }

    async fn delete(&self, user_id: &UserId, id: &WorkoutId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let before = state.workouts.len();
        state
            .workouts
            .retain(|w| !(w.id == *id && w.user_id == *user_id));
        if state.workouts.len() == before {
            return Err(DomainError::not_found(ErrorCode::NotFound, "Workout not found"));
        }
        Ok(())
    }
}
