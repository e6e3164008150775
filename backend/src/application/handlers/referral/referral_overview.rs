//! ReferralOverviewHandler - Query handler for the caller's referral program.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, Money, Timestamp, UserId};
use crate::ports::{AccountRepository, ReferralRepository, WalletRepository};

/// One member who signed up with the caller's code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferredMember {
    pub user_id: UserId,
    pub display_name: String,
    pub joined_at: Timestamp,
    pub signup_bonus: Money,
    pub cashback: Option<Money>,
    pub cashback_paid_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferralOverview {
    pub referral_code: String,
    pub referred_count: usize,
    /// Sum of referral credits actually posted to the wallet.
    pub total_earned: Money,
    pub referrals: Vec<ReferredMember>,
}

pub struct ReferralOverviewHandler {
    accounts: Arc<dyn AccountRepository>,
    referrals: Arc<dyn ReferralRepository>,
    wallets: Arc<dyn WalletRepository>,
}

impl ReferralOverviewHandler {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        referrals: Arc<dyn ReferralRepository>,
        wallets: Arc<dyn WalletRepository>,
    ) -> Self {
        Self {
            accounts,
            referrals,
            wallets,
        }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<ReferralOverview, DomainError> {
        let account = self
            .accounts
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(ErrorCode::UserNotFound, "User not found"))?;

        let referrals = self.referrals.list_by_referrer(user_id).await?;
        let ids: Vec<UserId> = referrals.iter().map(|r| r.referred_id).collect();
        let names: HashMap<UserId, String> = self
            .accounts
            .find_many(&ids)
            .await?
            .into_iter()
            .map(|a| (a.id, a.display_name))
            .collect();

        let referred: Vec<ReferredMember> = referrals
            .into_iter()
            .map(|r| ReferredMember {
                display_name: names.get(&r.referred_id).cloned().unwrap_or_default(),
                user_id: r.referred_id,
                joined_at: r.created_at,
                signup_bonus: r.signup_bonus,
                cashback: r.cashback,
                cashback_paid_at: r.cashback_paid_at,
            })
            .collect();

        Ok(ReferralOverview {
            referral_code: account.referral_code.as_str().to_string(),
            referred_count: referred.len(),
            total_earned: self.wallets.referral_earnings(user_id).await?,
            referrals: referred,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::auth::{SignupCommand, SignupHandler, SignupPolicy};
    use crate::application::handlers::test_support::{self, cents, FixedIssuer, PlainHasher};
    use crate::domain::foundation::Role;

    #[tokio::test]
    async fn overview_lists_referred_members_and_earnings() {
        let store = test_support::store();
        let referrer = test_support::account(&store, "coach@example.com", Role::Member).await;
        let signup = SignupHandler::new(
            store.clone(),
            Arc::new(PlainHasher),
            Arc::new(FixedIssuer),
            SignupPolicy {
                allow_signup: true,
                signup_bonus: cents(500),
            },
        );
        for email in ["a@example.com", "b@example.com"] {
            signup
                .handle(SignupCommand {
                    email: email.to_string(),
                    password: "password123".to_string(),
                    display_name: email.to_string(),
                    referral_code: Some(referrer.referral_code.as_str().to_string()),
                })
                .await
                .unwrap();
        }

        let overview = ReferralOverviewHandler::new(store.clone(), store.clone(), store)
            .handle(&referrer.id)
            .await
            .unwrap();
        assert_eq!(overview.referral_code, referrer.referral_code.as_str());
        assert_eq!(overview.referred_count, 2);
        assert_eq!(overview.total_earned, cents(1000));
        assert!(overview.referrals.iter().all(|r| r.cashback.is_none()));
        assert!(overview
            .referrals
            .iter()
            .any(|r| r.display_name == "a@example.com"));
    }

    #[tokio::test]
    async fn member_without_referrals_has_empty_overview() {
        let store = test_support::store();
        let account = test_support::account(&store, "solo@example.com", Role::Member).await;

        let overview = ReferralOverviewHandler::new(store.clone(), store.clone(), store)
            .handle(&account.id)
            .await
            .unwrap();
        assert_eq!(overview.referred_count, 0);
        assert!(overview.total_earned.is_zero());
    }
}
