//! Email Authentication Backend
//!
//! Checks an email and password against the stored hash.
//!
//! Every kind of mismatch is `Ok(None)`: unknown email, wrong password,
//! inactive account and malformed input all look the same to the caller.
//! Only storage failures are errors.

use std::sync::Arc;

use platform::password::Hasher;

use crate::application::config::AccountsConfig;
use crate::domain::entity::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{AccountId, AccountPassword, Email, RawPassword};
use crate::error::AccountResult;

/// Authentication backend keyed by email
pub struct EmailBackend<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    hasher: Hasher,
}

impl<R> EmailBackend<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountsConfig>) -> Self {
        Self {
            repo,
            hasher: config.hasher(),
        }
    }

    /// Return the account when the password matches and it is active
    pub async fn authenticate(&self, email: &str, password: &str) -> AccountResult<Option<Account>> {
        let Ok(raw) = RawPassword::new(password) else {
            tracing::debug!("Authentication rejected: blank password");
            return Ok(None);
        };

        let Ok(email) = Email::new(email) else {
            self.hasher.burn(raw.inner());
            tracing::debug!("Authentication rejected: malformed email");
            return Ok(None);
        };

        let Some(mut account) = self.repo.find_by_email(&email).await? else {
            // Same cost as a real verification
            self.hasher.burn(raw.inner());
            tracing::debug!("Authentication rejected: no such account");
            return Ok(None);
        };

        if !account.check_password(&raw, &self.hasher) {
            tracing::debug!(account_id = %account.account_id, "Authentication rejected: password mismatch");
            return Ok(None);
        }

        if account.password.needs_rehash(&self.hasher) {
            account.set_password(AccountPassword::hash(&raw, &self.hasher)?);
            self.repo.update(&account).await?;
            tracing::info!(account_id = %account.account_id, "Password hash upgraded");
        }

        if !account.can_authenticate() {
            tracing::debug!(account_id = %account.account_id, "Authentication rejected: inactive");
            return Ok(None);
        }

        tracing::info!(account_id = %account.account_id, "Account authenticated");

        Ok(Some(account))
    }

    /// Load an account by id, only if it is active
    pub async fn get_user(&self, account_id: &AccountId) -> AccountResult<Option<Account>> {
        let account = self.repo.find_by_id(account_id).await?;
        Ok(account.filter(Account::can_authenticate))
    }
}
