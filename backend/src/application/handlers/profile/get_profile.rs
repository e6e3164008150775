//! GetProfileHandler - Query handler for the caller's profile.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::Profile;
use crate::ports::{ProfileRepository, WeightRepository};

/// Profile plus values derived from it and the latest weigh-in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: Profile,
    pub age: Option<u32>,
    pub current_weight_kg: Option<f64>,
    pub bmi: Option<f64>,
}

impl ProfileView {
    pub fn build(profile: Profile, current_weight_kg: Option<f64>, today: NaiveDate) -> Self {
        Self {
            age: profile.age_on(today),
            bmi: current_weight_kg.and_then(|w| profile.bmi(w)),
            current_weight_kg,
            profile,
        }
    }
}

pub(crate) fn profile_not_found() -> DomainError {
    DomainError::not_found(ErrorCode::UserNotFound, "Profile not found")
}

pub struct GetProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
    weights: Arc<dyn WeightRepository>,
}

impl GetProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, weights: Arc<dyn WeightRepository>) -> Self {
        Self { profiles, weights }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<ProfileView, DomainError> {
        let profile = self
            .profiles
            .find(user_id)
            .await?
            .ok_or_else(profile_not_found)?;
        let latest = self.weights.latest(user_id).await?;

        Ok(ProfileView::build(
            profile,
            latest.map(|entry| entry.weight_kg),
            Timestamp::now().date(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support;
    use crate::domain::foundation::Role;
    use crate::domain::tracking::WeightEntry;
    use crate::domain::user::ProfilePatch;

    #[tokio::test]
    async fn derives_age_and_bmi_when_data_is_present() {
        let store = test_support::store();
        let account = test_support::account(&store, "p@example.com", Role::Member).await;
        let today = Timestamp::now().date();

        let mut profile = ProfileRepository::find(store.as_ref(), &account.id)
            .await
            .unwrap()
            .unwrap();
        profile
            .apply(
                ProfilePatch {
                    height_cm: Some(180.0),
                    birth_date: NaiveDate::from_ymd_opt(1990, 1, 1),
                    ..Default::default()
                },
                today,
            )
            .unwrap();
        ProfileRepository::update(store.as_ref(), &profile).await.unwrap();
        store
            .upsert(&WeightEntry::log(account.id, 81.0, None, None, today).unwrap())
            .await
            .unwrap();

        let view = GetProfileHandler::new(store.clone(), store)
            .handle(&account.id)
            .await
            .unwrap();
        assert_eq!(view.current_weight_kg, Some(81.0));
        assert_eq!(view.bmi, Some(25.0));
        assert!(view.age.unwrap() >= 30);
    }

    #[tokio::test]
    async fn empty_profile_has_no_derived_values() {
        let store = test_support::store();
        let account = test_support::account(&store, "p@example.com", Role::Member).await;

        let view = GetProfileHandler::new(store.clone(), store)
            .handle(&account.id)
            .await
            .unwrap();
        assert_eq!(view.age, None);
        assert_eq!(view.bmi, None);
        assert!(!view.profile.onboarding_completed);
    }
}
