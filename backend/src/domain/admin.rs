//! Read models for the admin back office.

use serde::Serialize;

use crate::domain::foundation::Money;

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_users: u64,
    pub active_users: u64,
    pub admin_users: u64,
    pub active_programs: u64,
    pub active_enrollments: u64,
    pub pending_payments: u64,
    pub approved_revenue: Money,
    pub total_wallet_balance: Money,
    pub pending_withdrawals: u64,
}
