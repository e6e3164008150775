//! DeleteWeightHandler - Command handler for removing a weigh-in.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId, WeightEntryId};
use crate::ports::WeightRepository;

pub struct DeleteWeightHandler {
    weights: Arc<dyn WeightRepository>,
}

impl DeleteWeightHandler {
    pub fn new(weights: Arc<dyn WeightRepository>) -> Self {
        Self { weights }
    }

    /// Entries owned by someone else are reported as not found.
    pub async fn handle(&self, user_id: &UserId, id: &WeightEntryId) -> Result<(), DomainError> {
        self.weights.delete(user_id, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support;
    use crate::domain::foundation::{ErrorCode, Timestamp};
    use crate::domain::tracking::WeightEntry;

    #[tokio::test]
    async fn only_owner_can_delete() {
        let store = test_support::store();
        let owner = UserId::new();
        let entry = store
            .upsert(&WeightEntry::log(owner, 70.0, None, None, Timestamp::now().date()).unwrap())
            .await
            .unwrap();
        let handler = DeleteWeightHandler::new(store.clone());

        let err = handler.handle(&UserId::new(), &entry.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        handler.handle(&owner, &entry.id).await.unwrap();
        assert!(store.latest(&owner).await.unwrap().is_none());
    }
}
