//! UpdateProfileHandler - Command handler for partial profile updates.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::user::ProfilePatch;
use crate::ports::{ProfileRepository, WeightRepository};

use super::get_profile::{profile_not_found, ProfileView};

#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub user_id: UserId,
    pub patch: ProfilePatch,
}

pub struct UpdateProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
    weights: Arc<dyn WeightRepository>,
}

impl UpdateProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, weights: Arc<dyn WeightRepository>) -> Self {
        Self { profiles, weights }
    }

    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<ProfileView, DomainError> {
        let today = Timestamp::now().date();
        let mut profile = self
            .profiles
            .find(&cmd.user_id)
            .await?
            .ok_or_else(profile_not_found)?;

        profile.apply(cmd.patch, today)?;
        self.profiles.update(&profile).await?;

        let latest = self.weights.latest(&cmd.user_id).await?;
        Ok(ProfileView::build(profile, latest.map(|e| e.weight_kg), today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support;
    use crate::domain::foundation::{ErrorCode, Role};
    use crate::domain::user::{FitnessGoal, Gender};

    #[tokio::test]
    async fn patch_updates_only_given_fields() {
        let store = test_support::store();
        let account = test_support::account(&store, "p@example.com", Role::Member).await;
        let handler = UpdateProfileHandler::new(store.clone(), store.clone());

        handler
            .handle(UpdateProfileCommand {
                user_id: account.id,
                patch: ProfilePatch {
                    gender: Some(Gender::Female),
                    ..Default::default()
                },
            })
            .await
            .unwrap();
        let view = handler
            .handle(UpdateProfileCommand {
                user_id: account.id,
                patch: ProfilePatch {
                    fitness_goal: Some(FitnessGoal::BuildMuscle),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(view.profile.gender, Some(Gender::Female));
        assert_eq!(view.profile.fitness_goal, Some(FitnessGoal::BuildMuscle));
    }

    #[tokio::test]
    async fn out_of_range_height_is_rejected_and_not_saved() {
        let store = test_support::store();
        let account = test_support::account(&store, "p@example.com", Role::Member).await;

        let err = UpdateProfileHandler::new(store.clone(), store.clone())
            .handle(UpdateProfileCommand {
                user_id: account.id,
                patch: ProfilePatch {
                    height_cm: Some(20.0),
                    gender: Some(Gender::Male),
                    ..Default::default()
                },
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let stored = ProfileRepository::find(store.as_ref(), &account.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.gender, None);
    }
}
