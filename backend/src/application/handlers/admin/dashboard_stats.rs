//! DashboardStatsHandler - Query handler for the admin dashboard.

use std::sync::Arc;

use crate::domain::admin::DashboardStats;
use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::AdminReader;

pub struct DashboardStatsHandler {
    reader: Arc<dyn AdminReader>,
}

impl DashboardStatsHandler {
    pub fn new(reader: Arc<dyn AdminReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self) -> Result<DashboardStats, DomainError> {
        self.reader.dashboard_stats(Timestamp::now()).await
    }
}
