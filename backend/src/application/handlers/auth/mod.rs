//! Signup, login and session handlers.

mod ensure_bootstrap_admin;
mod get_current_account;
mod login;
mod signup;

pub use ensure_bootstrap_admin::{
    BootstrapOutcome, EnsureBootstrapAdminCommand, EnsureBootstrapAdminHandler,
};
pub use get_current_account::GetCurrentAccountHandler;
pub use login::{LoginCommand, LoginHandler};
pub use signup::{SignupCommand, SignupHandler, SignupPolicy};

use crate::domain::user::Account;
use crate::ports::IssuedToken;

/// Token plus the account it was issued for.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: IssuedToken,
    pub account: Account,
}
