//! Account, profile and referral ports over the in-memory store.

use async_trait::async_trait;

use super::{newest_first, InMemoryStore};
use crate::domain::foundation::{DomainError, Email, ErrorCode, Page, PageRequest, Timestamp, UserId};
use crate::domain::referral::{Referral, ReferralCode};
use crate::domain::user::{Account, Profile};
use crate::domain::wallet::Wallet;
use crate::ports::{AccountRepository, NewAccount, ProfileRepository, ReferralRepository};

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn register(&self, new: &NewAccount) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let account = &new.account;

        if state.accounts.values().any(|a| a.email == account.email) {
            return Err(DomainError::new(ErrorCode::EmailTaken, "Email is already registered"));
        }
        if state
            .accounts
            .values()
            .any(|a| a.referral_code == account.referral_code)
        {
            return Err(DomainError::conflict("Referral code collision"));
        }
        if let Some(grant) = &new.referral {
            if state
                .referrals
                .iter()
                .any(|r| r.referred_id == grant.referral.referred_id)
            {
                return Err(DomainError::new(ErrorCode::ReferralInvalid, "User was already referred"));
            }
            // Validate the bonus against a scratch copy so nothing is written on failure.
            if let Some(bonus) = &grant.signup_bonus {
                let mut wallet = state
                    .wallets
                    .get(&bonus.user_id)
                    .cloned()
                    .ok_or_else(|| DomainError::new(ErrorCode::ReferralInvalid, "Referrer not found"))?;
                wallet.apply(bonus, Timestamp::now())?;
            }
        }

        state.accounts.insert(account.id, account.clone());
        state.profiles.insert(account.id, new.profile.clone());
        state.wallets.insert(account.id, Wallet::open(account.id));
        if let Some(grant) = &new.referral {
            state.referrals.push(grant.referral.clone());
            if let Some(bonus) = &grant.signup_bonus {
                state.apply_posting(bonus)?;
            }
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, DomainError> {
        Ok(self.state.read().await.accounts.get(id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, DomainError> {
        let state = self.state.read().await;
        Ok(state.accounts.values().find(|a| a.email == *email).cloned())
    }

    async fn find_by_referral_code(
        &self,
        code: &ReferralCode,
    ) -> Result<Option<Account>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .accounts
            .values()
            .find(|a| a.referral_code == *code)
            .cloned())
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<Account>, DomainError> {
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.accounts.get(id).cloned())
            .collect())
    }

    async fn update(&self, account: &Account) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        match state.accounts.get_mut(&account.id) {
            Some(existing) => {
                *existing = account.clone();
                Ok(())
            }
            None => Err(DomainError::not_found(ErrorCode::UserNotFound, "User not found")),
        }
    }

    async fn search(
        &self,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<Page<Account>, DomainError> {
        let state = self.state.read().await;
        let needle = search.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty());
        let matching: Vec<Account> = state
            .accounts
            .values()
            .filter(|a| match &needle {
                Some(n) => {
                    a.email.as_str().contains(n.as_str())
                        || a.display_name.to_lowercase().contains(n.as_str())
                }
                None => true,
            })
            .cloned()
            .collect();
        Ok(Page::from_vec(newest_first(&matching, |a| a.created_at), page))
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn find(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        Ok(self.state.read().await.profiles.get(user_id).cloned())
    }

    async fn update(&self, profile: &Profile) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        match state.profiles.get_mut(&profile.user_id) {
            Some(existing) => {
                *existing = profile.clone();
                Ok(())
            }
            None => Err(DomainError::not_found(ErrorCode::UserNotFound, "Profile not found")),
        }
    }
}

#[async_trait]
impl ReferralRepository for InMemoryStore {
    async fn find_by_referred(&self, user_id: &UserId) -> Result<Option<Referral>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .referrals
            .iter()
            .find(|r| r.referred_id == *user_id)
            .cloned())
    }

    async fn list_by_referrer(&self, user_id: &UserId) -> Result<Vec<Referral>, DomainError> {
        let state = self.state.read().await;
        let mine: Vec<Referral> = state
            .referrals
            .iter()
            .filter(|r| r.referrer_id == *user_id)
            .cloned()
            .collect();
        Ok(newest_first(&mine, |r| r.created_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::account;
    use crate::domain::foundation::Role;

    #[tokio::test]
    async fn search_treats_wildcard_characters_literally() {
        let store = InMemoryStore::new();
        account(&store, "first_last@example.com", Role::Member).await;
        account(&store, "bob@example.com", Role::Member).await;

        let page = PageRequest::default();
        let underscore = store.search(Some("_"), &page).await.unwrap();
        assert_eq!(underscore.items.len(), 1);
        assert_eq!(underscore.items[0].email.as_str(), "first_last@example.com");

        let percent = store.search(Some("%"), &page).await.unwrap();
        assert!(percent.items.is_empty());
    }
}
