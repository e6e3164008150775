//! WeightSummaryHandler - Query handler for weigh-in progress.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::tracking::WeightSummary;
use crate::ports::{ProfileRepository, WeightRepository};

pub struct WeightSummaryHandler {
    weights: Arc<dyn WeightRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl WeightSummaryHandler {
    pub fn new(weights: Arc<dyn WeightRepository>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { weights, profiles }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<WeightSummary, DomainError> {
        let entries = self.weights.list(user_id, None, None).await?;
        let target = self
            .profiles
            .find(user_id)
            .await?
            .and_then(|p| p.target_weight_kg);
        Ok(WeightSummary::compute(&entries, target))
    }
}
