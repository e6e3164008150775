//! Admin dashboard aggregates over the in-memory store.

use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::admin::DashboardStats;
use crate::domain::foundation::{DomainError, Money, ReviewStatus, Role, Timestamp};
use crate::ports::AdminReader;

#[async_trait]
impl AdminReader for InMemoryStore {
    async fn dashboard_stats(&self, now: Timestamp) -> Result<DashboardStats, DomainError> {
        let state = self.state.read().await;
        let count = |n: usize| n as u64;

        let revenue: i64 = state
            .payments
            .iter()
            .filter(|p| p.status == ReviewStatus::Approved)
            .map(|p| p.amount.cents())
            .sum();
        let balances: i64 = state.wallets.values().map(|w| w.balance.cents()).sum();

        Ok(DashboardStats {
            total_users: count(state.accounts.len()),
            active_users: count(state.accounts.values().filter(|a| a.is_active).count()),
            admin_users: count(state.accounts.values().filter(|a| a.role == Role::Admin).count()),
            active_programs: count(state.programs.values().filter(|p| p.is_active).count()),
            active_enrollments: count(
                state.enrollments.iter().filter(|e| e.is_active_at(now)).count(),
            ),
            pending_payments: count(
                state
                    .payments
                    .iter()
                    .filter(|p| p.status == ReviewStatus::Pending)
                    .count(),
            ),
            approved_revenue: Money::from_cents(revenue)?,
            total_wallet_balance: Money::from_cents(balances)?,
            pending_withdrawals: count(
                state
                    .withdrawals
                    .iter()
                    .filter(|w| w.status == ReviewStatus::Pending)
                    .count(),
            ),
        })
    }
}
