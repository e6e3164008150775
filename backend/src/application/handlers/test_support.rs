//! Shared fixtures for handler tests.

use std::sync::Arc;

use crate::adapters::memory::InMemoryStore;
use crate::domain::foundation::{DomainError, Email, Money, Role, Timestamp};
use crate::domain::program::{Program, ProgramDraft, ProgramLevel};
use crate::domain::user::{Account, Profile};
use crate::ports::{
    AccountRepository, IssuedToken, NewAccount, PasswordHasher, ProgramRepository, TokenIssuer,
};

/// Reversible "hash" so tests stay fast.
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("plain${}", password))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(hash == format!("plain${}", password))
    }
}

/// Issues `token-for-<user id>`.
pub struct FixedIssuer;

impl TokenIssuer for FixedIssuer {
    fn issue(&self, account: &Account) -> Result<IssuedToken, DomainError> {
        Ok(IssuedToken {
            access_token: format!("token-for-{}", account.id),
            token_type: "Bearer",
            expires_at: Timestamp::now().add_hours(1),
        })
    }
}

pub fn store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::new())
}

/// Registers an account with password `password123`.
pub async fn account(store: &InMemoryStore, email: &str, role: Role) -> Account {
    let account = Account::register(
        Email::parse(email).unwrap(),
        email.split('@').next().unwrap(),
        "plain$password123".to_string(),
        role,
    )
    .unwrap();
    store
        .register(&NewAccount {
            profile: Profile::empty(account.id),
            account: account.clone(),
            referral: None,
        })
        .await
        .unwrap();
    account
}

pub async fn program(store: &InMemoryStore, price_cents: i64, weeks: i32) -> Program {
    let program = Program::create(ProgramDraft {
        title: "Strength Basics".to_string(),
        description: Some("Three full-body sessions a week".to_string()),
        level: ProgramLevel::Beginner,
        duration_weeks: weeks,
        price_cents,
        is_active: true,
    })
    .unwrap();
    ProgramRepository::create(store, &program).await.unwrap();
    program
}

pub fn cents(value: i64) -> Money {
    Money::from_cents(value).unwrap()
}
