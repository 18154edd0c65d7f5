//! Account Entity
//!
//! A registered user, identified by email.

use chrono::{DateTime, Utc};
use derive_more::Display;
use platform::password::Hasher;
use serde::Serialize;
use std::fmt;

use crate::domain::value_object::{AccountId, AccountPassword, Email, RawPassword};

/// Privilege flags chosen at creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountFlags {
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl Default for AccountFlags {
    fn default() -> Self {
        Self {
            is_active: true,
            is_staff: false,
            is_superuser: false,
        }
    }
}

impl AccountFlags {
    /// Active, staff and superuser
    pub const fn administrative() -> Self {
        Self {
            is_active: true,
            is_staff: true,
            is_superuser: true,
        }
    }
}

/// Privilege level derived from the flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AccountKind {
    #[display("regular")]
    Regular,
    /// Staff without superuser, only reachable through explicit flags
    #[display("staff")]
    Staff,
    #[display("administrative")]
    Administrative,
}

/// Account entity
///
/// Fields are public: callers mutate them directly and persist with
/// `AccountManager::save`. Equality is identity (same `account_id`).
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub account_id: AccountId,
    /// Normalized, unique login identifier
    pub email: Email,
    /// Argon2id hash, never serialized
    #[serde(skip)]
    pub password: AccountPassword,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub date_joined: DateTime<Utc>,
}

impl Account {
    /// Create a regular, active account joined now
    pub fn new(email: Email, password: AccountPassword) -> Self {
        Self::with_flags(email, password, AccountFlags::default())
    }

    pub fn with_flags(email: Email, password: AccountPassword, flags: AccountFlags) -> Self {
        Self {
            account_id: AccountId::new(),
            email,
            password,
            is_active: flags.is_active,
            is_staff: flags.is_staff,
            is_superuser: flags.is_superuser,
            last_login: None,
            date_joined: Utc::now(),
        }
    }

    pub fn flags(&self) -> AccountFlags {
        AccountFlags {
            is_active: self.is_active,
            is_staff: self.is_staff,
            is_superuser: self.is_superuser,
        }
    }

    pub fn kind(&self) -> AccountKind {
        match (self.is_staff, self.is_superuser) {
            (true, true) => AccountKind::Administrative,
            (true, false) => AccountKind::Staff,
            _ => AccountKind::Regular,
        }
    }

    /// Only active accounts may authenticate
    #[inline]
    pub fn can_authenticate(&self) -> bool {
        self.is_active
    }

    pub fn check_password(&self, raw: &RawPassword, hasher: &Hasher) -> bool {
        self.password.verify(raw, hasher)
    }

    pub fn set_password(&mut self, password: AccountPassword) {
        self.password = password;
    }

    pub fn record_login(&mut self) {
        self.last_login = Some(Utc::now());
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.account_id == other.account_id
    }
}

impl Eq for Account {}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.email.as_str())
    }
}
