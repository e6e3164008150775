//! Account aggregate.
//!
//! # Invariants
//!
//! - `email` is unique case-insensitively (stored lowercased)
//! - `referral_code` is unique
//! - the password is only ever held as an Argon2 PHC string

use serde::Serialize;

use crate::domain::foundation::{
    bounded_text, AuthenticatedUser, DomainError, Email, Role, Timestamp, UserId, ValidationError,
};
use crate::domain::referral::ReferralCode;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;
pub const MAX_DISPLAY_NAME_LEN: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: UserId,
    pub email: Email,
    pub display_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub referral_code: ReferralCode,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Account {
    /// Creates a new active account. The password must already be hashed.
    pub fn register(
        email: Email,
        display_name: &str,
        password_hash: String,
        role: Role,
    ) -> Result<Self, ValidationError> {
        let display_name = bounded_text("display_name", display_name, 1, MAX_DISPLAY_NAME_LEN)?;
        let now = Timestamp::now();
        Ok(Self {
            id: UserId::new(),
            email,
            display_name,
            password_hash,
            role,
            is_active: true,
            referral_code: ReferralCode::generate(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Checks a plaintext password against the length policy.
    pub fn validate_password(password: &str) -> Result<(), ValidationError> {
        let len = password.chars().count();
        if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
            return Err(ValidationError::out_of_range(
                "password",
                MIN_PASSWORD_LEN as i64,
                MAX_PASSWORD_LEN as i64,
                len as i64,
            ));
        }
        Ok(())
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn to_authenticated_user(&self) -> AuthenticatedUser {
        AuthenticatedUser::new(self.id, self.email.as_str(), self.role)
    }

    /// Applies an admin change to role and/or active flag.
    ///
    /// Admins cannot demote or deactivate their own account.
    pub fn apply_admin_update(
        &mut self,
        actor: &UserId,
        role: Option<Role>,
        is_active: Option<bool>,
    ) -> Result<(), DomainError> {
        if *actor == self.id {
            if matches!(role, Some(r) if r != Role::Admin) {
                return Err(DomainError::forbidden("Admins cannot demote themselves"));
            }
            if is_active == Some(false) {
                return Err(DomainError::forbidden("Admins cannot deactivate themselves"));
            }
        }
        if let Some(role) = role {
            self.role = role;
        }
        if let Some(active) = is_active {
            self.is_active = active;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account::register(
            Email::parse("member@example.com").unwrap(),
            "  Member  ",
            "$argon2id$stub".to_string(),
            Role::Member,
        )
        .unwrap()
    }

    #[test]
    fn register_trims_display_name_and_activates() {
        let acc = account();
        assert_eq!(acc.display_name, "Member");
        assert!(acc.is_active);
        assert_eq!(acc.referral_code.as_str().len(), 8);
    }

    #[test]
    fn register_rejects_blank_display_name() {
        let result = Account::register(
            Email::parse("x@example.com").unwrap(),
            "  ",
            String::new(),
            Role::Member,
        );
        assert!(result.is_err());
    }

    #[test]
    fn password_policy_enforces_length() {
        assert!(Account::validate_password("short").is_err());
        assert!(Account::validate_password("long enough").is_ok());
        assert!(Account::validate_password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn admin_cannot_demote_self() {
        let mut admin = account();
        admin.role = Role::Admin;
        let id = admin.id;

        assert!(admin.apply_admin_update(&id, Some(Role::Member), None).is_err());
        assert!(admin.apply_admin_update(&id, None, Some(false)).is_err());
        assert_eq!(admin.role, Role::Admin);
    }

    #[test]
    fn admin_can_update_others() {
        let mut target = account();
        let admin = UserId::new();

        target
            .apply_admin_update(&admin, Some(Role::Admin), Some(false))
            .unwrap();
        assert!(target.is_admin());
        assert!(!target.is_active);
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let json = serde_json::to_string(&account()).unwrap();
        assert!(!json.contains("argon2"));
    }
}
