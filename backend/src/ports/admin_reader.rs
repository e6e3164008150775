//! Admin dashboard read port.

use async_trait::async_trait;

use crate::domain::admin::DashboardStats;
use crate::domain::foundation::{DomainError, Timestamp};

#[async_trait]
pub trait AdminReader: Send + Sync {
    /// Aggregate counters; enrollments are counted as active at `now`.
    async fn dashboard_stats(&self, now: Timestamp) -> Result<DashboardStats, DomainError>;
}
