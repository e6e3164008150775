//! Wallet rows and ledger postings inside a transaction.

use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use uuid::Uuid;

use super::{db, money, parse};
use crate::domain::foundation::{
    DomainError, ErrorCode, LedgerEntryId, Timestamp, UserId,
};
use crate::domain::wallet::{LedgerEntry, Posting, Wallet};

#[derive(Debug, sqlx::FromRow)]
pub(super) struct WalletRow {
    user_id: Uuid,
    balance_cents: i64,
    updated_at: DateTime<Utc>,
}

impl TryFrom<WalletRow> for Wallet {
    type Error = DomainError;

    fn try_from(row: WalletRow) -> Result<Self, Self::Error> {
        Ok(Wallet {
            user_id: UserId::from_uuid(row.user_id),
            balance: money("balance_cents", row.balance_cents)?,
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct LedgerRow {
    id: Uuid,
    user_id: Uuid,
    direction: String,
    category: String,
    amount_cents: i64,
    balance_after_cents: i64,
    reference_id: Option<Uuid>,
    description: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<LedgerRow> for LedgerEntry {
    type Error = DomainError;

    fn try_from(row: LedgerRow) -> Result<Self, Self::Error> {
        Ok(LedgerEntry {
            id: LedgerEntryId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            direction: parse("direction", &row.direction)?,
            category: parse("category", &row.category)?,
            amount: money("amount_cents", row.amount_cents)?,
            balance_after: money("balance_after_cents", row.balance_after_cents)?,
            reference_id: row.reference_id,
            description: row.description,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

pub(super) const LEDGER_COLUMNS: &str = "id, user_id, direction, category, amount_cents, \
     balance_after_cents, reference_id, description, created_at";

pub(super) fn wallet_not_found() -> DomainError {
    DomainError::not_found(ErrorCode::UserNotFound, "Wallet not found")
}

/// Locks the wallet row, applies the posting and appends the ledger entry.
///
/// Must run inside a transaction; the row lock is held until it commits.
pub(super) async fn apply_posting(
    conn: &mut PgConnection,
    posting: &Posting,
) -> Result<LedgerEntry, DomainError> {
    let row: Option<WalletRow> = sqlx::query_as(
        "SELECT user_id, balance_cents, updated_at FROM wallets WHERE user_id = $1 FOR UPDATE",
    )
    .bind(posting.user_id.as_uuid())
    .fetch_optional(&mut *conn)
    .await
    .map_err(db("Failed to lock wallet"))?;

    let mut wallet = Wallet::try_from(row.ok_or_else(wallet_not_found)?)?;
    let entry = wallet.apply(posting, Timestamp::now())?;

    sqlx::query("UPDATE wallets SET balance_cents = $2, updated_at = $3 WHERE user_id = $1")
        .bind(wallet.user_id.as_uuid())
        .bind(wallet.balance.cents())
        .bind(wallet.updated_at.as_datetime())
        .execute(&mut *conn)
        .await
        .map_err(db("Failed to update wallet"))?;

    sqlx::query(
        r#"
        INSERT INTO wallet_transactions (
            id, user_id, direction, category, amount_cents, balance_after_cents,
            reference_id, description, created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(entry.id.as_uuid())
    .bind(entry.user_id.as_uuid())
    .bind(entry.direction.as_str())
    .bind(entry.category.as_str())
    .bind(entry.amount.cents())
    .bind(entry.balance_after.cents())
    .bind(entry.reference_id)
    .bind(&entry.description)
    .bind(entry.created_at.as_datetime())
    .execute(&mut *conn)
    .await
    .map_err(db("Failed to append ledger entry"))?;

    Ok(entry)
}
