//! Admin dashboard aggregates over PostgreSQL.

use async_trait::async_trait;

use super::{count, db, money, PostgresStore};
use crate::domain::admin::DashboardStats;
use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::AdminReader;

#[derive(Debug, sqlx::FromRow)]
struct StatsRow {
    total_users: i64,
    active_users: i64,
    admin_users: i64,
    active_programs: i64,
    active_enrollments: i64,
    pending_payments: i64,
    approved_revenue_cents: i64,
    total_wallet_balance_cents: i64,
    pending_withdrawals: i64,
}

#[async_trait]
impl AdminReader for PostgresStore {
    async fn dashboard_stats(&self, now: Timestamp) -> Result<DashboardStats, DomainError> {
        let row: StatsRow = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM users WHERE is_active) AS active_users,
                (SELECT COUNT(*) FROM users WHERE role = 'admin') AS admin_users,
                (SELECT COUNT(*) FROM programs WHERE is_active) AS active_programs,
                (SELECT COUNT(*) FROM enrollments
                    WHERE starts_at <= $1 AND ends_at > $1) AS active_enrollments,
                (SELECT COUNT(*) FROM payments WHERE status = 'pending') AS pending_payments,
                (SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM payments
                    WHERE status = 'approved') AS approved_revenue_cents,
                (SELECT COALESCE(SUM(balance_cents), 0)::BIGINT FROM wallets)
                    AS total_wallet_balance_cents,
                (SELECT COUNT(*) FROM withdrawals WHERE status = 'pending') AS pending_withdrawals
            "#,
        )
        .bind(now.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(db("Failed to load dashboard stats"))?;

        Ok(DashboardStats {
            total_users: count(row.total_users),
            active_users: count(row.active_users),
            admin_users: count(row.admin_users),
            active_programs: count(row.active_programs),
            active_enrollments: count(row.active_enrollments),
            pending_payments: count(row.pending_payments),
            approved_revenue: money("approved_revenue_cents", row.approved_revenue_cents)?,
            total_wallet_balance: money(
                "total_wallet_balance_cents",
                row.total_wallet_balance_cents,
            )?,
            pending_withdrawals: count(row.pending_withdrawals),
        })
    }
}
