//! HTTP DTOs for signup, login and the current account.

use serde::{Deserialize, Serialize};

use crate::application::handlers::auth::AuthSession;
use crate::domain::foundation::{Role, Timestamp, UserId};
use crate::domain::user::Account;

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    #[serde(default)]
    pub referral_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountResponse {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub is_active: bool,
    pub referral_code: String,
    pub created_at: Timestamp,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email.as_str().to_string(),
            display_name: account.display_name,
            role: account.role,
            is_active: account.is_active,
            referral_code: account.referral_code.as_str().to_string(),
            created_at: account.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: Timestamp,
    pub user: AccountResponse,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            access_token: session.token.access_token,
            token_type: session.token.token_type.to_string(),
            expires_at: session.token.expires_at,
            user: AccountResponse::from(session.account),
        }
    }
}
