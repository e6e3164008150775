//! Friendship port over PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{db, parse, rows_to, violates, PostgresStore};
use crate::domain::foundation::{DomainError, ErrorCode, FriendshipId, Timestamp, UserId};
use crate::domain::social::{Friendship, FriendshipStatus};
use crate::ports::FriendshipRepository;

const FRIENDSHIP_COLUMNS: &str = "id, requester_id, addressee_id, status, created_at, responded_at";

#[derive(Debug, sqlx::FromRow)]
struct FriendshipRow {
    id: Uuid,
    requester_id: Uuid,
    addressee_id: Uuid,
    status: String,
    created_at: DateTime<Utc>,
    responded_at: Option<DateTime<Utc>>,
}

impl TryFrom<FriendshipRow> for Friendship {
    type Error = DomainError;

    fn try_from(row: FriendshipRow) -> Result<Self, Self::Error> {
        Ok(Friendship {
            id: FriendshipId::from_uuid(row.id),
            requester_id: UserId::from_uuid(row.requester_id),
            addressee_id: UserId::from_uuid(row.addressee_id),
            status: parse("status", &row.status)?,
            created_at: Timestamp::from_datetime(row.created_at),
            responded_at: row.responded_at.map(Timestamp::from_datetime),
        })
    }
}

fn not_found() -> DomainError {
    DomainError::not_found(ErrorCode::NotFound, "Friend request not found")
}

#[async_trait]
impl FriendshipRepository for PostgresStore {
    async fn find(&self, id: &FriendshipId) -> Result<Option<Friendship>, DomainError> {
        let row: Option<FriendshipRow> = sqlx::query_as(&format!(
            "SELECT {} FROM friendships WHERE id = $1",
            FRIENDSHIP_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db("Failed to load friendship"))?;
        row.map(Friendship::try_from).transpose()
    }

    async fn find_between(
        &self,
        a: &UserId,
        b: &UserId,
    ) -> Result<Option<Friendship>, DomainError> {
        let row: Option<FriendshipRow> = sqlx::query_as(&format!(
            "SELECT {} FROM friendships \
             WHERE (requester_id = $1 AND addressee_id = $2) \
                OR (requester_id = $2 AND addressee_id = $1)",
            FRIENDSHIP_COLUMNS
        ))
        .bind(a.as_uuid())
        .bind(b.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db("Failed to load friendship"))?;
        row.map(Friendship::try_from).transpose()
    }

    async fn insert(&self, friendship: &Friendship) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO friendships (
                id, requester_id, addressee_id, status, created_at, responded_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(friendship.id.as_uuid())
        .bind(friendship.requester_id.as_uuid())
        .bind(friendship.addressee_id.as_uuid())
        .bind(friendship.status.as_str())
        .bind(friendship.created_at.as_datetime())
        .bind(friendship.responded_at.map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, "friendships_pair_key") {
                return DomainError::conflict("A friendship already exists for this pair");
            }
            DomainError::database("Failed to insert friendship", e)
        })?;
        Ok(())
    }

    async fn update(&self, friendship: &Friendship) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE friendships SET
                requester_id = $2,
                addressee_id = $3,
                status = $4,
                created_at = $5,
                responded_at = $6
            WHERE id = $1
            "#,
        )
        .bind(friendship.id.as_uuid())
        .bind(friendship.requester_id.as_uuid())
        .bind(friendship.addressee_id.as_uuid())
        .bind(friendship.status.as_str())
        .bind(friendship.created_at.as_datetime())
        .bind(friendship.responded_at.map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(db("Failed to update friendship"))?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        Ok(())
    }

    async fn delete(&self, id: &FriendshipId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM friendships WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db("Failed to delete friendship"))?;
        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        status: FriendshipStatus,
    ) -> Result<Vec<Friendship>, DomainError> {
        let rows: Vec<FriendshipRow> = sqlx::query_as(&format!(
            "SELECT {} FROM friendships \
             WHERE (requester_id = $1 OR addressee_id = $1) AND status = $2 \
             ORDER BY created_at DESC",
            FRIENDSHIP_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db("Failed to list friendships"))?;
        rows_to(rows)
    }
}
