//! HTTP DTOs for the wallet, ledger and withdrawals.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::handlers::wallet::{RequestWithdrawalResult, WalletView};
use crate::domain::foundation::{LedgerEntryId, ReviewStatus, Timestamp, UserId, WithdrawalId};
use crate::domain::wallet::{Direction, LedgerCategory, LedgerEntry, Withdrawal};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerEntryResponse {
    pub id: LedgerEntryId,
    pub user_id: UserId,
    pub direction: Direction,
    pub category: LedgerCategory,
    pub amount_cents: i64,
    pub balance_after_cents: i64,
    pub reference_id: Option<Uuid>,
    pub description: String,
    pub created_at: Timestamp,
}

impl From<LedgerEntry> for LedgerEntryResponse {
    fn from(entry: LedgerEntry) -> Self {
        Self {
            id: entry.id,
            user_id: entry.user_id,
            direction: entry.direction,
            category: entry.category,
            amount_cents: entry.amount.cents(),
            balance_after_cents: entry.balance_after.cents(),
            reference_id: entry.reference_id,
            description: entry.description,
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletResponse {
    pub user_id: UserId,
    pub balance_cents: i64,
    pub recent_transactions: Vec<LedgerEntryResponse>,
}

impl From<WalletView> for WalletResponse {
    fn from(view: WalletView) -> Self {
        Self {
            user_id: view.user_id,
            balance_cents: view.balance.cents(),
            recent_transactions: view.recent_entries.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WithdrawalResponse {
    pub id: WithdrawalId,
    pub user_id: UserId,
    pub amount_cents: i64,
    pub destination: String,
    pub status: ReviewStatus,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<UserId>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<Withdrawal> for WithdrawalResponse {
    fn from(w: Withdrawal) -> Self {
        Self {
            id: w.id,
            user_id: w.user_id,
            amount_cents: w.amount.cents(),
            destination: w.destination,
            status: w.status,
            rejection_reason: w.rejection_reason,
            reviewed_by: w.reviewed_by,
            reviewed_at: w.reviewed_at,
            created_at: w.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalRequestResponse {
    pub withdrawal: WithdrawalResponse,
    pub transaction: LedgerEntryResponse,
}

impl From<RequestWithdrawalResult> for WithdrawalRequestResponse {
    fn from(result: RequestWithdrawalResult) -> Self {
        Self {
            withdrawal: result.withdrawal.into(),
            transaction: result.ledger_entry.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestWithdrawalRequest {
    pub amount_cents: i64,
    pub destination: String,
}

/// `?user_id=&page=&per_page=` for the admin ledger.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LedgerParams {
    pub user_id: Option<UserId>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdjustWalletRequest {
    pub user_id: UserId,
    pub direction: Direction,
    pub amount_cents: i64,
    pub description: String,
}
