//! Referral reward and wallet limits

use serde::Deserialize;

use super::error::ValidationError;

/// Amounts used by the referral program and withdrawals. All money is in cents.
#[derive(Debug, Clone, Deserialize)]
pub struct RewardsConfig {
    /// Credited to the referrer when a referred account signs up
    #[serde(default = "default_signup_bonus")]
    pub signup_bonus_cents: i64,

    /// Share of the referred user's first approved payment paid to the referrer
    #[serde(default = "default_cashback_percent")]
    pub payment_cashback_percent: u8,

    /// Smallest withdrawal a member may request
    #[serde(default = "default_min_withdrawal")]
    pub min_withdrawal_cents: i64,
}

impl RewardsConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.signup_bonus_cents < 0 || self.min_withdrawal_cents < 0 {
            return Err(ValidationError::NegativeReward);
        }
        if self.payment_cashback_percent > 100 {
            return Err(ValidationError::InvalidCashbackPercent);
        }
        Ok(())
    }
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            signup_bonus_cents: default_signup_bonus(),
            payment_cashback_percent: default_cashback_percent(),
            min_withdrawal_cents: default_min_withdrawal(),
        }
    }
}

fn default_signup_bonus() -> i64 {
    500
}

fn default_cashback_percent() -> u8 {
    10
}

fn default_min_withdrawal() -> i64 {
    1000
}
