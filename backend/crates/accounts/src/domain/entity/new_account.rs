//! New Account Input
//!
//! Unvalidated creation input. `clean_fields` reports every field problem at
//! once without touching storage.

use platform::password::{PasswordPolicy, PasswordPolicyError};
use std::fmt;
use zeroize::Zeroize;

use crate::domain::entity::account::AccountFlags;
use crate::domain::value_object::{Email, RawPassword};
use crate::error::ValidationErrors;

const BLANK: &str = "This field cannot be blank.";

pub struct NewAccount {
    pub email: String,
    password: String,
    pub flags: AccountFlags,
}

/// Input that passed field validation
#[derive(Debug)]
pub struct CleanedAccount {
    pub email: Email,
    pub password: RawPassword,
    pub flags: AccountFlags,
}

impl NewAccount {
    /// Regular, active account input
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            flags: AccountFlags::default(),
        }
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.flags.is_active = is_active;
        self
    }

    pub fn staff(mut self, is_staff: bool) -> Self {
        self.flags.is_staff = is_staff;
        self
    }

    pub fn superuser(mut self, is_superuser: bool) -> Self {
        self.flags.is_superuser = is_superuser;
        self
    }

    /// Validate email and password, collecting every failure
    pub fn clean_fields(&self) -> Result<(), ValidationErrors> {
        self.clean(None).map(|_| ())
    }

    /// Validate and convert; `policy` adds strength rules on top of the
    /// blank check
    pub fn clean(&self, policy: Option<&PasswordPolicy>) -> Result<CleanedAccount, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let email = Email::new(&self.email)
            .map_err(|e| errors.add("email", e.to_string()))
            .ok();

        let password = RawPassword::new(self.password.clone())
            .and_then(|raw| match policy {
                Some(policy) => raw.check(policy).map(|_| raw),
                None => Ok(raw),
            })
            .map_err(|e| errors.add("password", password_message(&e)))
            .ok();

        match (email, password) {
            (Some(email), Some(password)) => Ok(CleanedAccount {
                email,
                password,
                flags: self.flags,
            }),
            _ => Err(errors),
        }
    }
}

/// Field message for a rejected password
pub(crate) fn password_message(error: &PasswordPolicyError) -> String {
    match error {
        PasswordPolicyError::EmptyOrWhitespace => BLANK.to_string(),
        other => other.to_string(),
    }
}

impl Drop for NewAccount {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("flags", &self.flags)
            .finish()
    }
}
