//! LogWeightHandler - Command handler for daily weigh-ins.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::tracking::WeightEntry;
use crate::ports::WeightRepository;

#[derive(Debug, Clone)]
pub struct LogWeightCommand {
    pub user_id: UserId,
    pub weight_kg: f64,
    pub recorded_on: Option<NaiveDate>,
    pub note: Option<String>,
}

/// One entry per user per day; logging the same day again replaces it.
pub struct LogWeightHandler {
    weights: Arc<dyn WeightRepository>,
}

impl LogWeightHandler {
    pub fn new(weights: Arc<dyn WeightRepository>) -> Self {
        Self { weights }
    }

    pub async fn handle(&self, cmd: LogWeightCommand) -> Result<WeightEntry, DomainError> {
        let entry = WeightEntry::log(
            cmd.user_id,
            cmd.weight_kg,
            cmd.recorded_on,
            cmd.note.as_deref(),
            Timestamp::now().date(),
        )?;
        self.weights.upsert(&entry).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support;
    use crate::domain::foundation::ErrorCode;

    fn log(user_id: UserId, kg: f64, on: Option<NaiveDate>) -> LogWeightCommand {
        LogWeightCommand {
            user_id,
            weight_kg: kg,
            recorded_on: on,
            note: None,
        }
    }

    #[tokio::test]
    async fn second_entry_same_day_replaces_first() {
        let store = test_support::store();
        let handler = LogWeightHandler::new(store.clone());
        let user = UserId::new();

        let first = handler.handle(log(user, 82.0, None)).await.unwrap();
        let second = handler.handle(log(user, 81.4, None)).await.unwrap();

        assert_eq!(second.id, first.id);
        let all = store.list(&user, None, None).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].weight_kg, 81.4);
    }

    #[tokio::test]
    async fn future_date_is_rejected() {
        let tomorrow = Timestamp::now().add_days(1).date();
        let err = LogWeightHandler::new(test_support::store())
            .handle(log(UserId::new(), 80.0, Some(tomorrow)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field").map(String::as_str), Some("recorded_on"));
    }
}
