//! In-memory adapters.
//!
//! `InMemoryStore` implements every persistence port over one shared
//! lock, so multi-row writes (signup, payment approval, withdrawals) are
//! atomic exactly as they are in PostgreSQL. Used by the handler, router
//! and API tests.

mod accounts;
mod admin;
mod catalog;
mod social;
mod tracking;
mod wallet;

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ProgramId, Timestamp, UserId};
use crate::domain::payment::Payment;
use crate::domain::program::{Enrollment, Program};
use crate::domain::referral::Referral;
use crate::domain::social::Friendship;
use crate::domain::tracking::{WeightEntry, Workout};
use crate::domain::user::{Account, Profile};
use crate::domain::wallet::{LedgerEntry, Posting, Wallet, Withdrawal};

#[derive(Debug, Default)]
struct MemoryState {
    accounts: HashMap<UserId, Account>,
    profiles: HashMap<UserId, Profile>,
    wallets: HashMap<UserId, Wallet>,
    ledger: Vec<LedgerEntry>,
    referrals: Vec<Referral>,
    weights: Vec<WeightEntry>,
    workouts: Vec<Workout>,
    programs: HashMap<ProgramId, Program>,
    enrollments: Vec<Enrollment>,
    payments: Vec<Payment>,
    withdrawals: Vec<Withdrawal>,
    friendships: Vec<Friendship>,
}

impl MemoryState {
    /// Applies a posting to its wallet and appends the ledger entry.
    fn apply_posting(&mut self, posting: &Posting) -> Result<LedgerEntry, DomainError> {
        let wallet = self
            .wallets
            .get_mut(&posting.user_id)
            .ok_or_else(|| DomainError::not_found(ErrorCode::UserNotFound, "Wallet not found"))?;
        let entry = wallet.apply(posting, Timestamp::now())?;
        self.ledger.push(entry.clone());
        Ok(entry)
    }
}

/// Shared in-memory implementation of all repository ports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ledger entries across all wallets.
    pub async fn ledger_len(&self) -> usize {
        self.state.read().await.ledger.len()
    }
}

/// Items in reverse insertion order, then stably sorted newest first.
fn newest_first<T: Clone>(items: &[T], key: impl Fn(&T) -> Timestamp) -> Vec<T> {
    let mut out: Vec<T> = items.iter().rev().cloned().collect();
    out.sort_by_key(|item| std::cmp::Reverse(key(item)));
    out
}
