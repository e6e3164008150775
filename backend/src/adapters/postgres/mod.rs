//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! `PostgresStore` implements every persistence port over one connection
//! pool. Operations that touch several tables (signup with a referral bonus,
//! payment approval, withdrawals, ledger postings) run in one transaction and
//! lock the affected wallet row with `SELECT ... FOR UPDATE`.

mod accounts;
mod admin;
mod catalog;
mod ledger;
mod social;
mod tracking;
mod wallet;

use std::str::FromStr;

use sqlx::migrate::MigrateError;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode, Money, ValidationError};

/// PostgreSQL implementation of all repository ports.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Opens a connection pool using the configured limits.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    config.pool_options().connect(&config.url).await
}

/// Applies the embedded migrations from `backend/migrations`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!().run(pool).await
}

// ════════════════════════════════════════════════════════════════════════════════
// Helper Functions
// ════════════════════════════════════════════════════════════════════════════════

/// Maps a sqlx failure to a `DATABASE_ERROR` with context.
fn db(context: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| DomainError::database(context, e)
}

/// True when `err` violates the named unique constraint or index.
fn violates(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint() == Some(constraint),
        _ => false,
    }
}

fn corrupt(column: &str, err: ValidationError) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Invalid {} value in database: {}", column, err),
    )
}

fn money(column: &str, cents: i64) -> Result<Money, DomainError> {
    Money::from_cents(cents).map_err(|e| corrupt(column, e))
}

fn parse<T>(column: &str, value: &str) -> Result<T, DomainError>
where
    T: FromStr<Err = ValidationError>,
{
    value.parse().map_err(|e| corrupt(column, e))
}

fn parse_opt<T>(column: &str, value: Option<String>) -> Result<Option<T>, DomainError>
where
    T: FromStr<Err = ValidationError>,
{
    value.map(|v| parse(column, &v)).transpose()
}

fn rows_to<R, T>(rows: Vec<R>) -> Result<Vec<T>, DomainError>
where
    T: TryFrom<R, Error = DomainError>,
{
    rows.into_iter().map(T::try_from).collect()
}

/// Converts a `COUNT(*)` result into a page total.
fn count(total: i64) -> u64 {
    u64::try_from(total).unwrap_or(0)
}
