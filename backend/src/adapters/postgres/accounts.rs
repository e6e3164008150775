//! Account, profile and referral ports over PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::ledger::apply_posting;
use super::{corrupt, count, db, money, parse, parse_opt, rows_to, violates, PostgresStore};
use crate::domain::foundation::{
    DomainError, Email, ErrorCode, Page, PageRequest, ReferralId, Timestamp, UserId,
};
use crate::domain::referral::{Referral, ReferralCode};
use crate::domain::user::{Account, Profile};
use crate::ports::{AccountRepository, NewAccount, ProfileRepository, ReferralRepository};

// ════════════════════════════════════════════════════════════════════════════════
// Rows
// ════════════════════════════════════════════════════════════════════════════════

const ACCOUNT_COLUMNS: &str =
    "id, email, display_name, password_hash, role, is_active, referral_code, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    display_name: String,
    password_hash: String,
    role: String,
    is_active: bool,
    referral_code: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = DomainError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: UserId::from_uuid(row.id),
            email: Email::parse(&row.email).map_err(|e| corrupt("email", e))?,
            display_name: row.display_name,
            password_hash: row.password_hash,
            role: parse("role", &row.role)?,
            is_active: row.is_active,
            referral_code: ReferralCode::from_stored(row.referral_code),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    user_id: Uuid,
    full_name: Option<String>,
    gender: Option<String>,
    birth_date: Option<NaiveDate>,
    height_cm: Option<f64>,
    target_weight_kg: Option<f64>,
    fitness_goal: Option<String>,
    activity_level: Option<String>,
    onboarding_completed: bool,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = DomainError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        Ok(Profile {
            user_id: UserId::from_uuid(row.user_id),
            full_name: row.full_name,
            gender: parse_opt("gender", row.gender)?,
            birth_date: row.birth_date,
            height_cm: row.height_cm,
            target_weight_kg: row.target_weight_kg,
            fitness_goal: parse_opt("fitness_goal", row.fitness_goal)?,
            activity_level: parse_opt("activity_level", row.activity_level)?,
            onboarding_completed: row.onboarding_completed,
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReferralRow {
    id: Uuid,
    referrer_id: Uuid,
    referred_id: Uuid,
    signup_bonus_cents: i64,
    cashback_cents: Option<i64>,
    cashback_paid_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReferralRow> for Referral {
    type Error = DomainError;

    fn try_from(row: ReferralRow) -> Result<Self, Self::Error> {
        Ok(Referral {
            id: ReferralId::from_uuid(row.id),
            referrer_id: UserId::from_uuid(row.referrer_id),
            referred_id: UserId::from_uuid(row.referred_id),
            signup_bonus: money("signup_bonus_cents", row.signup_bonus_cents)?,
            cashback: row
                .cashback_cents
                .map(|c| money("cashback_cents", c))
                .transpose()?,
            cashback_paid_at: row.cashback_paid_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn user_not_found() -> DomainError {
    DomainError::not_found(ErrorCode::UserNotFound, "User not found")
}

// ════════════════════════════════════════════════════════════════════════════════
// AccountRepository
// ════════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl AccountRepository for PostgresStore {
    async fn register(&self, new: &NewAccount) -> Result<(), DomainError> {
        let account = &new.account;
        let profile = &new.profile;
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db("Failed to start transaction"))?;

        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, display_name, password_hash, role, is_active,
                referral_code, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(account.email.as_str())
        .bind(&account.display_name)
        .bind(&account.password_hash)
        .bind(account.role.as_str())
        .bind(account.is_active)
        .bind(account.referral_code.as_str())
        .bind(account.created_at.as_datetime())
        .bind(account.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if violates(&e, "users_email_key") {
                return DomainError::new(ErrorCode::EmailTaken, "Email is already registered");
            }
            if violates(&e, "users_referral_code_key") {
                return DomainError::conflict("Referral code collision");
            }
            DomainError::database("Failed to insert user", e)
        })?;

        sqlx::query(
            r#"
            INSERT INTO profiles (
                user_id, full_name, gender, birth_date, height_cm, target_weight_kg,
                fitness_goal, activity_level, onboarding_completed, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(profile.user_id.as_uuid())
        .bind(&profile.full_name)
        .bind(profile.gender.map(|g| g.as_str()))
        .bind(profile.birth_date)
        .bind(profile.height_cm)
        .bind(profile.target_weight_kg)
        .bind(profile.fitness_goal.map(|g| g.as_str()))
        .bind(profile.activity_level.map(|a| a.as_str()))
        .bind(profile.onboarding_completed)
        .bind(profile.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db("Failed to insert profile"))?;

        sqlx::query("INSERT INTO wallets (user_id, balance_cents, updated_at) VALUES ($1, 0, $2)")
            .bind(account.id.as_uuid())
            .bind(account.created_at.as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(db("Failed to open wallet"))?;

        if let Some(grant) = &new.referral {
            let referral = &grant.referral;
            sqlx::query(
                r#"
                INSERT INTO referrals (
                    id, referrer_id, referred_id, signup_bonus_cents,
                    cashback_cents, cashback_paid_at, created_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(referral.id.as_uuid())
            .bind(referral.referrer_id.as_uuid())
            .bind(referral.referred_id.as_uuid())
            .bind(referral.signup_bonus.cents())
            .bind(referral.cashback.map(|c| c.cents()))
            .bind(referral.cashback_paid_at.map(|t| *t.as_datetime()))
            .bind(referral.created_at.as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if violates(&e, "referrals_referred_key") {
                    return DomainError::new(ErrorCode::ReferralInvalid, "User was already referred");
                }
                DomainError::database("Failed to insert referral", e)
            })?;

            if let Some(bonus) = &grant.signup_bonus {
                apply_posting(&mut *tx, bonus).await.map_err(|e| {
                    if e.code == ErrorCode::UserNotFound {
                        DomainError::new(ErrorCode::ReferralInvalid, "Referrer not found")
                    } else {
                        e
                    }
                })?;
            }
        }

        tx.commit()
            .await
            .map_err(db("Failed to commit transaction"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, DomainError> {
        let row: Option<AccountRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE id = $1", ACCOUNT_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(db("Failed to load user"))?;
        row.map(Account::try_from).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, DomainError> {
        let row: Option<AccountRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE email = $1", ACCOUNT_COLUMNS))
                .bind(email.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(db("Failed to load user"))?;
        row.map(Account::try_from).transpose()
    }

    async fn find_by_referral_code(
        &self,
        code: &ReferralCode,
    ) -> Result<Option<Account>, DomainError> {
        let row: Option<AccountRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE referral_code = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db("Failed to load user"))?;
        row.map(Account::try_from).transpose()
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<Account>, DomainError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<AccountRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE id = ANY($1)", ACCOUNT_COLUMNS))
                .bind(&uuids)
                .fetch_all(&self.pool)
                .await
                .map_err(db("Failed to load users"))?;
        rows_to(rows)
    }

    async fn update(&self, account: &Account) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                display_name = $2,
                password_hash = $3,
                role = $4,
                is_active = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(&account.display_name)
        .bind(&account.password_hash)
        .bind(account.role.as_str())
        .bind(account.is_active)
        .bind(account.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db("Failed to update user"))?;

        if result.rows_affected() == 0 {
            return Err(user_not_found());
        }
        Ok(())
    }

    async fn search(
        &self,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<Page<Account>, DomainError> {
        let pattern = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .map(|s| contains_pattern(&s));
        let filter = r"($1::TEXT IS NULL OR lower(email) LIKE $1 ESCAPE '\' OR lower(display_name) LIKE $1 ESCAPE '\')";

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM users WHERE {}", filter))
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(db("Failed to count users"))?;

        let rows: Vec<AccountRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE {} ORDER BY created_at DESC LIMIT $2 OFFSET $3",
            ACCOUNT_COLUMNS, filter
        ))
        .bind(&pattern)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db("Failed to list users"))?;

        Ok(Page::new(rows_to(rows)?, page, count(total)))
    }
}

/// `LIKE` pattern matching `term` as a literal substring.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ════════════════════════════════════════════════════════════════════════════════
// ProfileRepository
// ════════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl ProfileRepository for PostgresStore {
    async fn find(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r#"
            SELECT user_id, full_name, gender, birth_date, height_cm, target_weight_kg,
                   fitness_goal, activity_level, onboarding_completed, updated_at
            FROM profiles WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db("Failed to load profile"))?;
        row.map(Profile::try_from).transpose()
    }

    async fn update(&self, profile: &Profile) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE profiles SET
                full_name = $2,
                gender = $3,
                birth_date = $4,
                height_cm = $5,
                target_weight_kg = $6,
                fitness_goal = $7,
                activity_level = $8,
                onboarding_completed = $9,
                updated_at = $10
            WHERE user_id = $1
            "#,
        )
        .bind(profile.user_id.as_uuid())
        .bind(&profile.full_name)
        .bind(profile.gender.map(|g| g.as_str()))
        .bind(profile.birth_date)
        .bind(profile.height_cm)
        .bind(profile.target_weight_kg)
        .bind(profile.fitness_goal.map(|g| g.as_str()))
        .bind(profile.activity_level.map(|a| a.as_str()))
        .bind(profile.onboarding_completed)
        .bind(profile.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db("Failed to update profile"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(ErrorCode::UserNotFound, "Profile not found"));
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// ReferralRepository
// ════════════════════════════════════════════════════════════════════════════════

const REFERRAL_COLUMNS: &str = "id, referrer_id, referred_id, signup_bonus_cents, \
     cashback_cents, cashback_paid_at, created_at";

#[async_trait]
impl ReferralRepository for PostgresStore {
    async fn find_by_referred(&self, user_id: &UserId) -> Result<Option<Referral>, DomainError> {
        let row: Option<ReferralRow> = sqlx::query_as(&format!(
            "SELECT {} FROM referrals WHERE referred_id = $1",
            REFERRAL_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db("Failed to load referral"))?;
        row.map(Referral::try_from).transpose()
    }

    async fn list_by_referrer(&self, user_id: &UserId) -> Result<Vec<Referral>, DomainError> {
        let rows: Vec<ReferralRow> = sqlx::query_as(&format!(
            "SELECT {} FROM referrals WHERE referrer_id = $1 ORDER BY created_at DESC",
            REFERRAL_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db("Failed to list referrals"))?;
        rows_to(rows)
    }
}
