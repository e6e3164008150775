//! Program, enrollment and payment ports over PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::ledger::apply_posting;
use super::{count, db, money, parse, rows_to, violates, PostgresStore};
use crate::domain::foundation::{
    DomainError, EnrollmentId, ErrorCode, Page, PageRequest, PaymentId, ProgramId, ReviewStatus,
    Timestamp, UserId,
};
use crate::domain::payment::{already_reviewed, Payment};
use crate::domain::program::{Enrollment, EnrollmentView, Program};
use crate::ports::{EnrollmentReader, PaymentApproval, PaymentRepository, ProgramRepository};

// ════════════════════════════════════════════════════════════════════════════════
// Rows
// ════════════════════════════════════════════════════════════════════════════════

const PROGRAM_COLUMNS: &str =
    "id, title, description, level, duration_weeks, price_cents, is_active, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct ProgramRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    level: String,
    duration_weeks: i32,
    price_cents: i64,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProgramRow> for Program {
    type Error = DomainError;

    fn try_from(row: ProgramRow) -> Result<Self, Self::Error> {
        Ok(Program {
            id: ProgramId::from_uuid(row.id),
            title: row.title,
            description: row.description,
            level: parse("level", &row.level)?,
            duration_weeks: row.duration_weeks,
            price: money("price_cents", row.price_cents)?,
            is_active: row.is_active,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EnrollmentRow {
    id: Uuid,
    user_id: Uuid,
    program_id: Uuid,
    payment_id: Uuid,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    program_title: String,
}

impl EnrollmentRow {
    fn into_view(self, now: Timestamp) -> EnrollmentView {
        let enrollment = Enrollment {
            id: EnrollmentId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            program_id: ProgramId::from_uuid(self.program_id),
            payment_id: PaymentId::from_uuid(self.payment_id),
            starts_at: Timestamp::from_datetime(self.starts_at),
            ends_at: Timestamp::from_datetime(self.ends_at),
            created_at: Timestamp::from_datetime(self.created_at),
        };
        EnrollmentView {
            is_active: enrollment.is_active_at(now),
            program_title: self.program_title,
            enrollment,
        }
    }
}

const PAYMENT_COLUMNS: &str = "id, user_id, program_id, amount_cents, reference, receipt_url, \
     status, rejection_reason, reviewed_by, reviewed_at, created_at";

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    user_id: Uuid,
    program_id: Uuid,
    amount_cents: i64,
    reference: String,
    receipt_url: String,
    status: String,
    rejection_reason: Option<String>,
    reviewed_by: Option<Uuid>,
    reviewed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(Payment {
            id: PaymentId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            program_id: ProgramId::from_uuid(row.program_id),
            amount: money("amount_cents", row.amount_cents)?,
            reference: row.reference,
            receipt_url: row.receipt_url,
            status: parse("status", &row.status)?,
            rejection_reason: row.rejection_reason,
            reviewed_by: row.reviewed_by.map(UserId::from_uuid),
            reviewed_at: row.reviewed_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// ProgramRepository
// ════════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl ProgramRepository for PostgresStore {
    async fn create(&self, program: &Program) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO programs (
                id, title, description, level, duration_weeks, price_cents,
                is_active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(program.id.as_uuid())
        .bind(&program.title)
        .bind(&program.description)
        .bind(program.level.as_str())
        .bind(program.duration_weeks)
        .bind(program.price.cents())
        .bind(program.is_active)
        .bind(program.created_at.as_datetime())
        .bind(program.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, "programs_pkey") {
                return DomainError::conflict("Program already exists");
            }
            DomainError::database("Failed to create program", e)
        })?;
        Ok(())
    }

    async fn update(&self, program: &Program) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE programs SET
                title = $2,
                description = $3,
                level = $4,
                duration_weeks = $5,
                price_cents = $6,
                is_active = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(program.id.as_uuid())
        .bind(&program.title)
        .bind(&program.description)
        .bind(program.level.as_str())
        .bind(program.duration_weeks)
        .bind(program.price.cents())
        .bind(program.is_active)
        .bind(program.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db("Failed to update program"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(ErrorCode::ProgramNotFound, "Program not found"));
        }
        Ok(())
    }

    async fn find(&self, id: &ProgramId) -> Result<Option<Program>, DomainError> {
        let row: Option<ProgramRow> =
            sqlx::query_as(&format!("SELECT {} FROM programs WHERE id = $1", PROGRAM_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(db("Failed to load program"))?;
        row.map(Program::try_from).transpose()
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Program>, DomainError> {
        let rows: Vec<ProgramRow> = sqlx::query_as(&format!(
            "SELECT {} FROM programs WHERE ($1 = FALSE OR is_active) ORDER BY title",
            PROGRAM_COLUMNS
        ))
        .bind(active_only)
        .fetch_all(&self.pool)
        .await
        .map_err(db("Failed to list programs"))?;
        rows_to(rows)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// EnrollmentReader
// ════════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl EnrollmentReader for PostgresStore {
    async fn list_for_user(
        &self,
        user_id: &UserId,
        now: Timestamp,
    ) -> Result<Vec<EnrollmentView>, DomainError> {
        let rows: Vec<EnrollmentRow> = sqlx::query_as(
            r#"
            SELECT e.id, e.user_id, e.program_id, e.payment_id, e.starts_at, e.ends_at,
                   e.created_at, p.title AS program_title
            FROM enrollments e
            JOIN programs p ON p.id = e.program_id
            WHERE e.user_id = $1
            ORDER BY e.starts_at DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db("Failed to list enrollments"))?;
        Ok(rows.into_iter().map(|row| row.into_view(now)).collect())
    }

    async fn latest_end(
        &self,
        user_id: &UserId,
        program_id: &ProgramId,
    ) -> Result<Option<Timestamp>, DomainError> {
        let end: Option<DateTime<Utc>> = sqlx::query_scalar(
            "SELECT MAX(ends_at) FROM enrollments WHERE user_id = $1 AND program_id = $2",
        )
        .bind(user_id.as_uuid())
        .bind(program_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(db("Failed to load enrollment end"))?;
        Ok(end.map(Timestamp::from_datetime))
    }

    async fn has_access(
        &self,
        user_id: &UserId,
        program_id: &ProgramId,
        at: Timestamp,
    ) -> Result<bool, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM enrollments
                WHERE user_id = $1 AND program_id = $2 AND starts_at <= $3 AND ends_at > $3
            )
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(program_id.as_uuid())
        .bind(at.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(db("Failed to check program access"))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// PaymentRepository
// ════════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl PaymentRepository for PostgresStore {
    async fn submit(&self, payment: &Payment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, user_id, program_id, amount_cents, reference, receipt_url,
                status, rejection_reason, reviewed_by, reviewed_at, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.user_id.as_uuid())
        .bind(payment.program_id.as_uuid())
        .bind(payment.amount.cents())
        .bind(&payment.reference)
        .bind(&payment.receipt_url)
        .bind(payment.status.as_str())
        .bind(&payment.rejection_reason)
        .bind(payment.reviewed_by.map(|id| *id.as_uuid()))
        .bind(payment.reviewed_at.map(|t| *t.as_datetime()))
        .bind(payment.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, "payments_one_pending_per_program") {
                return DomainError::conflict(
                    "A payment for this program is already awaiting review",
                );
            }
            DomainError::database("Failed to submit payment", e)
        })?;
        Ok(())
    }

    async fn find(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError> {
        let row: Option<PaymentRow> =
            sqlx::query_as(&format!("SELECT {} FROM payments WHERE id = $1", PAYMENT_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(db("Failed to load payment"))?;
        row.map(Payment::try_from).transpose()
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Payment>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payments WHERE user_id = $1 ORDER BY created_at DESC",
            PAYMENT_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db("Failed to list payments"))?;
        rows_to(rows)
    }

    async fn list(
        &self,
        status: Option<ReviewStatus>,
        page: &PageRequest,
    ) -> Result<Page<Payment>, DomainError> {
        let status = status.map(|s| s.as_str());

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM payments WHERE ($1::TEXT IS NULL OR status = $1)")
                .bind(status)
                .fetch_one(&self.pool)
                .await
                .map_err(db("Failed to count payments"))?;

        let rows: Vec<PaymentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payments WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
            PAYMENT_COLUMNS
        ))
        .bind(status)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db("Failed to list payments"))?;

        Ok(Page::new(rows_to(rows)?, page, count(total)))
    }

    async fn approve(&self, approval: &PaymentApproval) -> Result<(), DomainError> {
        let payment = &approval.payment;
        let enrollment = &approval.enrollment;
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db("Failed to start transaction"))?;

        let updated = sqlx::query(
            r#"
            UPDATE payments SET status = $2, reviewed_by = $3, reviewed_at = $4
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.status.as_str())
        .bind(payment.reviewed_by.map(|id| *id.as_uuid()))
        .bind(payment.reviewed_at.map(|t| *t.as_datetime()))
        .execute(&mut *tx)
        .await
        .map_err(db("Failed to approve payment"))?;
        if updated.rows_affected() == 0 {
            return Err(already_reviewed(&payment.id));
        }

        sqlx::query(
            r#"
            INSERT INTO enrollments (
                id, user_id, program_id, payment_id, starts_at, ends_at, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(enrollment.id.as_uuid())
        .bind(enrollment.user_id.as_uuid())
        .bind(enrollment.program_id.as_uuid())
        .bind(enrollment.payment_id.as_uuid())
        .bind(enrollment.starts_at.as_datetime())
        .bind(enrollment.ends_at.as_datetime())
        .bind(enrollment.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db("Failed to create enrollment"))?;

        // Cashback is skipped when the referral was settled in the meantime.
        if let Some(cashback) = &approval.cashback {
            let at = payment.reviewed_at.unwrap_or_else(Timestamp::now);
            let settled = sqlx::query(
                r#"
                UPDATE referrals SET cashback_cents = $2, cashback_paid_at = $3
                WHERE id = $1 AND cashback_paid_at IS NULL
                "#,
            )
            .bind(cashback.referral_id.as_uuid())
            .bind(cashback.amount.cents())
            .bind(at.as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(db("Failed to settle referral cashback"))?;

            if settled.rows_affected() == 1 {
                if let Some(posting) = &cashback.posting {
                    apply_posting(&mut *tx, posting).await?;
                }
            }
        }

        tx.commit()
            .await
            .map_err(db("Failed to commit transaction"))?;
        Ok(())
    }

    async fn reject(&self, payment: &Payment) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE payments SET status = $2, rejection_reason = $3, reviewed_by = $4, reviewed_at = $5
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.status.as_str())
        .bind(&payment.rejection_reason)
        .bind(payment.reviewed_by.map(|id| *id.as_uuid()))
        .bind(payment.reviewed_at.map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(db("Failed to reject payment"))?;

        if result.rows_affected() == 0 {
            return Err(already_reviewed(&payment.id));
        }
        Ok(())
    }
}
