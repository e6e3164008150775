//! Wallet, ledger and withdrawal ports over PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::ledger::{apply_posting, LedgerRow, WalletRow, LEDGER_COLUMNS};
use super::{count, db, money, parse, rows_to, PostgresStore};
use crate::domain::foundation::{
    DomainError, ErrorCode, Money, Page, PageRequest, ReviewStatus, Timestamp, UserId,
    WithdrawalId,
};
use crate::domain::wallet::{LedgerCategory, LedgerEntry, Posting, Wallet, Withdrawal};
use crate::ports::WalletRepository;

const WITHDRAWAL_COLUMNS: &str = "id, user_id, amount_cents, destination, status, \
     rejection_reason, reviewed_by, reviewed_at, created_at";

#[derive(Debug, sqlx::FromRow)]
struct WithdrawalRow {
    id: Uuid,
    user_id: Uuid,
    amount_cents: i64,
    destination: String,
    status: String,
    rejection_reason: Option<String>,
    reviewed_by: Option<Uuid>,
    reviewed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<WithdrawalRow> for Withdrawal {
    type Error = DomainError;

    fn try_from(row: WithdrawalRow) -> Result<Self, Self::Error> {
        Ok(Withdrawal {
            id: WithdrawalId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            amount: money("amount_cents", row.amount_cents)?,
            destination: row.destination,
            status: parse("status", &row.status)?,
            rejection_reason: row.rejection_reason,
            reviewed_by: row.reviewed_by.map(UserId::from_uuid),
            reviewed_at: row.reviewed_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn already_resolved(id: &WithdrawalId) -> DomainError {
    DomainError::new(
        ErrorCode::InvalidStateTransition,
        format!("Withdrawal {} has already been reviewed", id),
    )
}

#[async_trait]
impl WalletRepository for PostgresStore {
    async fn find(&self, user_id: &UserId) -> Result<Option<Wallet>, DomainError> {
        let row: Option<WalletRow> =
            sqlx::query_as("SELECT user_id, balance_cents, updated_at FROM wallets WHERE user_id = $1")
                .bind(user_id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(db("Failed to load wallet"))?;
        row.map(Wallet::try_from).transpose()
    }

    async fn post(&self, posting: &Posting) -> Result<LedgerEntry, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db("Failed to start transaction"))?;
        let entry = apply_posting(&mut *tx, posting).await?;
        tx.commit()
            .await
            .map_err(db("Failed to commit transaction"))?;
        Ok(entry)
    }

    async fn recent_entries(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<LedgerEntry>, DomainError> {
        let rows: Vec<LedgerRow> = sqlx::query_as(&format!(
            "SELECT {} FROM wallet_transactions WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2",
            LEDGER_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(db("Failed to load ledger entries"))?;
        rows_to(rows)
    }

    async fn list_entries(
        &self,
        user_id: Option<&UserId>,
        page: &PageRequest,
    ) -> Result<Page<LedgerEntry>, DomainError> {
        let user = user_id.map(|id| *id.as_uuid());

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM wallet_transactions WHERE ($1::UUID IS NULL OR user_id = $1)",
        )
        .bind(user)
        .fetch_one(&self.pool)
        .await
        .map_err(db("Failed to count ledger entries"))?;

        let rows: Vec<LedgerRow> = sqlx::query_as(&format!(
            "SELECT {} FROM wallet_transactions WHERE ($1::UUID IS NULL OR user_id = $1) \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
            LEDGER_COLUMNS
        ))
        .bind(user)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db("Failed to list ledger entries"))?;

        Ok(Page::new(rows_to(rows)?, page, count(total)))
    }

    async fn referral_earnings(&self, user_id: &UserId) -> Result<Money, DomainError> {
        let categories = vec![
            LedgerCategory::ReferralSignupBonus.as_str(),
            LedgerCategory::ReferralPaymentCashback.as_str(),
        ];
        let cents: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM wallet_transactions
            WHERE user_id = $1 AND category = ANY($2)
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(&categories)
        .fetch_one(&self.pool)
        .await
        .map_err(db("Failed to sum referral earnings"))?;
        money("amount_cents", cents)
    }

    async fn create_withdrawal(
        &self,
        withdrawal: &Withdrawal,
        debit: &Posting,
    ) -> Result<LedgerEntry, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db("Failed to start transaction"))?;

        let entry = apply_posting(&mut *tx, debit).await?;

        sqlx::query(
            r#"
            INSERT INTO withdrawals (
                id, user_id, amount_cents, destination, status,
                rejection_reason, reviewed_by, reviewed_at, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(withdrawal.id.as_uuid())
        .bind(withdrawal.user_id.as_uuid())
        .bind(withdrawal.amount.cents())
        .bind(&withdrawal.destination)
        .bind(withdrawal.status.as_str())
        .bind(&withdrawal.rejection_reason)
        .bind(withdrawal.reviewed_by.map(|id| *id.as_uuid()))
        .bind(withdrawal.reviewed_at.map(|t| *t.as_datetime()))
        .bind(withdrawal.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db("Failed to create withdrawal"))?;

        tx.commit()
            .await
            .map_err(db("Failed to commit transaction"))?;
        Ok(entry)
    }

    async fn find_withdrawal(&self, id: &WithdrawalId) -> Result<Option<Withdrawal>, DomainError> {
        let row: Option<WithdrawalRow> = sqlx::query_as(&format!(
            "SELECT {} FROM withdrawals WHERE id = $1",
            WITHDRAWAL_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db("Failed to load withdrawal"))?;
        row.map(Withdrawal::try_from).transpose()
    }

    async fn list_withdrawals_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Withdrawal>, DomainError> {
        let rows: Vec<WithdrawalRow> = sqlx::query_as(&format!(
            "SELECT {} FROM withdrawals WHERE user_id = $1 ORDER BY created_at DESC",
            WITHDRAWAL_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db("Failed to list withdrawals"))?;
        rows_to(rows)
    }

    async fn list_withdrawals(
        &self,
        status: Option<ReviewStatus>,
        page: &PageRequest,
    ) -> Result<Page<Withdrawal>, DomainError> {
        let status = status.map(|s| s.as_str());

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM withdrawals WHERE ($1::TEXT IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(db("Failed to count withdrawals"))?;

        let rows: Vec<WithdrawalRow> = sqlx::query_as(&format!(
            "SELECT {} FROM withdrawals WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
            WITHDRAWAL_COLUMNS
        ))
        .bind(status)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db("Failed to list withdrawals"))?;

        Ok(Page::new(rows_to(rows)?, page, count(total)))
    }

    async fn resolve_withdrawal(
        &self,
        withdrawal: &Withdrawal,
        reversal: Option<&Posting>,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db("Failed to start transaction"))?;

        let updated = sqlx::query(
            r#"
            UPDATE withdrawals SET
                status = $2, rejection_reason = $3, reviewed_by = $4, reviewed_at = $5
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(withdrawal.id.as_uuid())
        .bind(withdrawal.status.as_str())
        .bind(&withdrawal.rejection_reason)
        .bind(withdrawal.reviewed_by.map(|id| *id.as_uuid()))
        .bind(withdrawal.reviewed_at.map(|t| *t.as_datetime()))
        .execute(&mut *tx)
        .await
        .map_err(db("Failed to resolve withdrawal"))?;
        if updated.rows_affected() == 0 {
            return Err(already_resolved(&withdrawal.id));
        }

        if let Some(posting) = reversal {
            apply_posting(&mut *tx, posting).await?;
        }

        tx.commit()
            .await
            .map_err(db("Failed to commit transaction"))?;
        Ok(())
    }
}
