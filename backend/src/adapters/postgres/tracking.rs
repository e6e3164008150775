//! Weight and workout ports over PostgreSQL.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{count, db, PostgresStore};
use crate::domain::foundation::{
    DomainError, ErrorCode, Page, PageRequest, Timestamp, UserId, WeightEntryId, WorkoutId,
};
use crate::domain::tracking::{Exercise, WeightEntry, Workout};
use crate::ports::{WeightRepository, WorkoutRepository};

// ════════════════════════════════════════════════════════════════════════════════
// Rows
// ════════════════════════════════════════════════════════════════════════════════

const WEIGHT_COLUMNS: &str = "id, user_id, weight_kg, recorded_on, note, created_at";

#[derive(Debug, sqlx::FromRow)]
struct WeightRow {
    id: Uuid,
    user_id: Uuid,
    weight_kg: f64,
    recorded_on: NaiveDate,
    note: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<WeightRow> for WeightEntry {
    fn from(row: WeightRow) -> Self {
        WeightEntry {
            id: WeightEntryId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            weight_kg: row.weight_kg,
            recorded_on: row.recorded_on,
            note: row.note,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

const WORKOUT_COLUMNS: &str = "id, user_id, title, performed_at, duration_minutes, notes, created_at";

#[derive(Debug, sqlx::FromRow)]
struct WorkoutRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    performed_at: DateTime<Utc>,
    duration_minutes: i32,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct ExerciseRow {
    workout_id: Uuid,
    name: String,
    sets: i32,
    reps: i32,
    weight_kg: Option<f64>,
    duration_seconds: Option<i32>,
}

/// Attaches exercises (in logged order) to their workouts.
async fn with_exercises(
    pool: &PgPool,
    rows: Vec<WorkoutRow>,
) -> Result<Vec<Workout>, DomainError> {
    let ids: Vec<Uuid> = rows.iter().map(|w| w.id).collect();
    let exercise_rows: Vec<ExerciseRow> = sqlx::query_as(
        r#"
        SELECT workout_id, name, sets, reps, weight_kg, duration_seconds
        FROM workout_exercises
        WHERE workout_id = ANY($1)
        ORDER BY workout_id, position
        "#,
    )
    .bind(&ids)
    .fetch_all(pool)
    .await
    .map_err(db("Failed to load exercises"))?;

    let mut by_workout: HashMap<Uuid, Vec<Exercise>> = HashMap::new();
    for row in exercise_rows {
        by_workout.entry(row.workout_id).or_default().push(Exercise {
            name: row.name,
            sets: row.sets,
            reps: row.reps,
            weight_kg: row.weight_kg,
            duration_seconds: row.duration_seconds,
        });
    }

    Ok(rows
        .into_iter()
        .map(|row| Workout {
            exercises: by_workout.remove(&row.id).unwrap_or_default(),
            id: WorkoutId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            title: row.title,
            performed_at: Timestamp::from_datetime(row.performed_at),
            duration_minutes: row.duration_minutes,
            notes: row.notes,
            created_at: Timestamp::from_datetime(row.created_at),
        })
        .collect())
}

// ════════════════════════════════════════════════════════════════════════════════
// WeightRepository
// ════════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl WeightRepository for PostgresStore {
    async fn upsert(&self, entry: &WeightEntry) -> Result<WeightEntry, DomainError> {
        let row: WeightRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO weight_entries (id, user_id, weight_kg, recorded_on, note, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, recorded_on)
            DO UPDATE SET weight_kg = EXCLUDED.weight_kg, note = EXCLUDED.note
            RETURNING {}
            "#,
            WEIGHT_COLUMNS
        ))
        .bind(entry.id.as_uuid())
        .bind(entry.user_id.as_uuid())
        .bind(entry.weight_kg)
        .bind(entry.recorded_on)
        .bind(&entry.note)
        .bind(entry.created_at.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(db("Failed to save weight entry"))?;
        Ok(row.into())
    }

    async fn list(
        &self,
        user_id: &UserId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<WeightEntry>, DomainError> {
        let rows: Vec<WeightRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM weight_entries
            WHERE user_id = $1
              AND ($2::DATE IS NULL OR recorded_on >= $2)
              AND ($3::DATE IS NULL OR recorded_on <= $3)
            ORDER BY recorded_on
            "#,
            WEIGHT_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(db("Failed to list weight entries"))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn latest(&self, user_id: &UserId) -> Result<Option<WeightEntry>, DomainError> {
        let row: Option<WeightRow> = sqlx::query_as(&format!(
            "SELECT {} FROM weight_entries WHERE user_id = $1 ORDER BY recorded_on DESC LIMIT 1",
            WEIGHT_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db("Failed to load latest weight"))?;
        Ok(row.map(Into::into))
    }

    async fn delete(&self, user_id: &UserId, id: &WeightEntryId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM weight_entries WHERE id = $1 AND user_id = $2")
            .bind(id.as_uuid())
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db("Failed to delete weight entry"))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(ErrorCode::NotFound, "Weight entry not found"));
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// WorkoutRepository
// ════════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl WorkoutRepository for PostgresStore {
    async fn save(&self, workout: &Workout) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db("Failed to start transaction"))?;

        sqlx::query(
            r#"
            INSERT INTO workouts (
                id, user_id, title, performed_at, duration_minutes, notes, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(workout.id.as_uuid())
        .bind(workout.user_id.as_uuid())
        .bind(&workout.title)
        .bind(workout.performed_at.as_datetime())
        .bind(workout.duration_minutes)
        .bind(&workout.notes)
        .bind(workout.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db("Failed to save workout"))?;

        for (position, exercise) in workout.exercises.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO workout_exercises (
                    workout_id, position, name, sets, reps, weight_kg, duration_seconds
                ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(workout.id.as_uuid())
            .bind(position as i32)
            .bind(&exercise.name)
            .bind(exercise.sets)
            .bind(exercise.reps)
            .bind(exercise.weight_kg)
            .bind(exercise.duration_seconds)
            .execute(&mut *tx)
            .await
            .map_err(db("Failed to save exercise"))?;
        }

        tx.commit()
            .await
            .map_err(db("Failed to commit transaction"))?;
        Ok(())
    }

    async fn find(
        &self,
        user_id: &UserId,
        id: &WorkoutId,
    ) -> Result<Option<Workout>, DomainError> {
        let row: Option<WorkoutRow> = sqlx::query_as(&format!(
            "SELECT {} FROM workouts WHERE id = $1 AND user_id = $2",
            WORKOUT_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db("Failed to load workout"))?;

        match row {
            Some(row) => Ok(with_exercises(&self.pool, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list(
        &self,
        user_id: &UserId,
        page: &PageRequest,
    ) -> Result<Page<Workout>, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workouts WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(db("Failed to count workouts"))?;

        let rows: Vec<WorkoutRow> = sqlx::query_as(&format!(
            "SELECT {} FROM workouts WHERE user_id = $1 \
             ORDER BY performed_at DESC LIMIT $2 OFFSET $3",
            WORKOUT_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db("Failed to list workouts"))?;

        let items = with_exercises(&self.pool, rows).await?;
        Ok(Page::new(items, page, count(total)))
    }

    async fn list_all(&self, user_id: &UserId) -> Result<Vec<Workout>, DomainError> {
        let rows: Vec<WorkoutRow> = sqlx::query_as(&format!(
            "SELECT {} FROM workouts WHERE user_id = $1 ORDER BY performed_at DESC",
            WORKOUT_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db("Failed to list workouts"))?;
        with_exercises(&self.pool, rows).await
    }

    async fn recent_for_users(
        &self,
        user_ids: &[UserId],
        limit: u32,
    ) -> Result<Vec<Workout>, DomainError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = user_ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<WorkoutRow> = sqlx::query_as(&format!(
            "SELECT {} FROM workouts WHERE user_id = ANY($1) ORDER BY performed_at DESC LIMIT $2",
            WORKOUT_COLUMNS
        ))
        .bind(&ids)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(db("Failed to load friend activity"))?;
        with_exercises(&self.pool, rows).await
    }

    async fn delete(&self, user_id: &UserId, id: &WorkoutId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1 AND user_id = $2")
            .bind(id.as_uuid())
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db("Failed to delete workout"))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(ErrorCode::NotFound, "Workout not found"));
        }
        Ok(())
    }
}
