//! CompleteOnboardingHandler - Command handler that closes onboarding.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::Profile;
use crate::ports::ProfileRepository;

use super::get_profile::profile_not_found;

pub struct CompleteOnboardingHandler {
    profiles: Arc<dyn ProfileRepository>,
}

impl CompleteOnboardingHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// Fails listing `missing_fields` until the required fields are set.
    pub async fn handle(&self, user_id: &UserId) -> Result<Profile, DomainError> {
        let mut profile = self
            .profiles
            .find(user_id)
            .await?
            .ok_or_else(profile_not_found)?;

        if !profile.onboarding_completed {
            profile.complete_onboarding()?;
            self.profiles.update(&profile).await?;
            tracing::info!(user_id = %user_id, "onboarding completed");
        }
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support;
    use crate::domain::foundation::{ErrorCode, Role, Timestamp};
    use crate::domain::user::{ActivityLevel, FitnessGoal, Gender, ProfilePatch};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn incomplete_profile_lists_missing_fields() {
        let store = test_support::store();
        let account = test_support::account(&store, "p@example.com", Role::Member).await;

        let err = CompleteOnboardingHandler::new(store)
            .handle(&account.id)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(
            err.details.get("missing_fields").map(String::as_str),
            Some("gender,birth_date,height_cm,fitness_goal,activity_level")
        );
    }

    #[tokio::test]
    async fn complete_profile_finishes_onboarding_idempotently() {
        let store = test_support::store();
        let account = test_support::account(&store, "p@example.com", Role::Member).await;
        let mut profile = store.find(&account.id).await.unwrap().unwrap();
        profile
            .apply(
                ProfilePatch {
                    gender: Some(Gender::Other),
                    birth_date: NaiveDate::from_ymd_opt(1995, 6, 1),
                    height_cm: Some(170.0),
                    fitness_goal: Some(FitnessGoal::LoseWeight),
                    activity_level: Some(ActivityLevel::Moderate),
                    ..Default::default()
                },
                Timestamp::now().date(),
            )
            .unwrap();
        store.update(&profile).await.unwrap();

        let handler = CompleteOnboardingHandler::new(store.clone());
        assert!(handler.handle(&account.id).await.unwrap().onboarding_completed);
        assert!(handler.handle(&account.id).await.unwrap().onboarding_completed);
    }
}
