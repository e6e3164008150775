//! ListWeightsHandler - Query handler for weigh-ins in a date range.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::tracking::WeightEntry;
use crate::ports::WeightRepository;

#[derive(Debug, Clone)]
pub struct ListWeightsQuery {
    pub user_id: UserId,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

pub struct ListWeightsHandler {
    weights: Arc<dyn WeightRepository>,
}

impl ListWeightsHandler {
    pub fn new(weights: Arc<dyn WeightRepository>) -> Self {
        Self { weights }
    }

    /// Ascending by date; both bounds inclusive.
    pub async fn handle(&self, query: ListWeightsQuery) -> Result<Vec<WeightEntry>, DomainError> {
        if let (Some(from), Some(to)) = (query.from, query.to) {
            if from > to {
                return Err(DomainError::validation("from", "'from' must not be after 'to'"));
            }
        }
        self.weights.list(&query.user_id, query.from, query.to).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support;
    use crate::domain::foundation::ErrorCode;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[tokio::test]
    async fn lists_range_in_date_order() {
        let store = test_support::store();
        let user = UserId::new();
        for (kg, d) in [(80.0, 3), (81.0, 1), (79.5, 5)] {
            store
                .upsert(&WeightEntry::log(user, kg, Some(day(d)), None, day(31)).unwrap())
                .await
                .unwrap();
        }

        let entries = ListWeightsHandler::new(store)
            .handle(ListWeightsQuery {
                user_id: user,
                from: Some(day(2)),
                to: Some(day(5)),
            })
            .await
            .unwrap();
        let dates: Vec<_> = entries.iter().map(|e| e.recorded_on).collect();
        assert_eq!(dates, vec![day(3), day(5)]);
    }

    #[tokio::test]
    async fn inverted_range_is_rejected() {
        let err = ListWeightsHandler::new(test_support::store())
            .handle(ListWeightsQuery {
                user_id: UserId::new(),
                from: Some(day(9)),
                to: Some(day(2)),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
