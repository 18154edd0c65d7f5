//! Row mapping shared by the SQL backends

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entity::Account;
use crate::domain::value_object::{AccountId, AccountPassword, Email};
use crate::error::AccountResult;

#[derive(sqlx::FromRow)]
pub(crate) struct AccountRow {
    account_id: Uuid,
    email: String,
    password_hash: String,
    is_active: bool,
    is_staff: bool,
    is_superuser: bool,
    last_login: Option<DateTime<Utc>>,
    date_joined: DateTime<Utc>,
}

impl AccountRow {
    pub(crate) fn into_account(self) -> AccountResult<Account> {
        Ok(Account {
            account_id: AccountId::from_uuid(self.account_id),
            email: Email::from_db(self.email),
            password: AccountPassword::from_phc_string(self.password_hash)?,
            is_active: self.is_active,
            is_staff: self.is_staff,
            is_superuser: self.is_superuser,
            last_login: self.last_login,
            date_joined: self.date_joined,
        })
    }
}
