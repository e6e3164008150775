//! SignupHandler - Command handler for creating member accounts.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Email, ErrorCode, Money, Role};
use crate::domain::referral::{Referral, ReferralCode};
use crate::domain::user::{Account, Profile};
use crate::domain::wallet::{LedgerCategory, Posting};
use crate::ports::{AccountRepository, NewAccount, PasswordHasher, ReferralGrant, TokenIssuer};

use super::AuthSession;

/// Referral codes are random; a collision just means drawing again.
const MAX_CODE_ATTEMPTS: usize = 5;

/// Command to create a member account.
#[derive(Debug, Clone)]
pub struct SignupCommand {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub referral_code: Option<String>,
}

/// Settings that shape signup.
#[derive(Debug, Clone, Copy)]
pub struct SignupPolicy {
    pub allow_signup: bool,
    pub signup_bonus: Money,
}

/// Handler for signups.
///
/// The account, its profile, its wallet, the referral record and the
/// referrer's signup bonus are written in one repository call.
pub struct SignupHandler {
    accounts: Arc<dyn AccountRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
    policy: SignupPolicy,
}

impl SignupHandler {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
        policy: SignupPolicy,
    ) -> Self {
        Self {
            accounts,
            hasher,
            tokens,
            policy,
        }
    }

    pub async fn handle(&self, cmd: SignupCommand) -> Result<AuthSession, DomainError> {
        if !self.policy.allow_signup {
            return Err(DomainError::forbidden("Signup is currently disabled"));
        }

        let email = Email::parse(&cmd.email)?;
        Account::validate_password(&cmd.password)?;

        if self.accounts.find_by_email(&email).await?.is_some() {
            return Err(DomainError::new(ErrorCode::EmailTaken, "Email is already registered"));
        }

        let referrer = match cmd.referral_code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => Some(self.resolve_referrer(code).await?),
            _ => None,
        };

        let password_hash = self.hasher.hash(&cmd.password)?;

        let mut attempt = 0;
        let account = loop {
            attempt += 1;
            let account =
                Account::register(email.clone(), &cmd.display_name, password_hash.clone(), Role::Member)?;
            let new = NewAccount {
                profile: Profile::empty(account.id),
                referral: referrer
                    .as_ref()
                    .map(|referrer| self.referral_grant(referrer, &account))
                    .transpose()?,
                account,
            };

            match self.accounts.register(&new).await {
                Ok(()) => break new.account,
                Err(e) if e.code == ErrorCode::Conflict && attempt < MAX_CODE_ATTEMPTS => {
                    tracing::debug!(attempt, "referral code collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        };

        tracing::info!(
            user_id = %account.id,
            referred = referrer.is_some(),
            "account created"
        );

        let token = self.tokens.issue(&account)?;
        Ok(AuthSession { token, account })
    }

    async fn resolve_referrer(&self, raw: &str) -> Result<Account, DomainError> {
        let invalid = || DomainError::new(ErrorCode::ReferralInvalid, "Referral code is not valid");
        let code = ReferralCode::parse(raw).map_err(|_| invalid())?;
        self.accounts
            .find_by_referral_code(&code)
            .await?
            .filter(|referrer| referrer.is_active)
            .ok_or_else(invalid)
    }

    fn referral_grant(
        &self,
        referrer: &Account,
        account: &Account,
    ) -> Result<ReferralGrant, DomainError> {
        let bonus = self.policy.signup_bonus;
        let referral = Referral::new(referrer.id, account.id, bonus)?;
        let signup_bonus = if bonus.is_zero() {
            None
        } else {
            Some(Posting::new(
                referrer.id,
                LedgerCategory::ReferralSignupBonus,
                bonus,
                Some(*referral.id.as_uuid()),
                format!("Signup bonus for referring {}", account.display_name),
            )?)
        };
        Ok(ReferralGrant {
            referral,
            signup_bonus,
        })
    }
}
