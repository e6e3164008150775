//! HTTP DTOs for the admin back office.

use serde::{Deserialize, Serialize};

use crate::adapters::http::auth::AccountResponse;
use crate::application::handlers::admin::UserDetail;
use crate::domain::foundation::Role;
use crate::domain::user::Profile;

/// `?search=&page=&per_page=` for the user list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserSearchParams {
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Partial account update. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserDetailResponse {
    #[serde(flatten)]
    pub account: AccountResponse,
    pub profile: Option<Profile>,
    pub wallet_balance_cents: i64,
}

impl From<UserDetail> for UserDetailResponse {
    fn from(detail: UserDetail) -> Self {
        Self {
            account: detail.account.into(),
            profile: detail.profile,
            wallet_balance_cents: detail.wallet_balance.cents(),
        }
    }
}
