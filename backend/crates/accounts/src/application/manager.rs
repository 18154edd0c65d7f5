//! Account Manager
//!
//! Factory and persistence entry points for accounts.
//!
//! Accounts are created through `create_user` (regular, or with
//! caller-chosen flags) or `create_superuser` (always active, staff and
//! superuser). Later changes are plain field assignments followed by `save`.

use std::sync::Arc;

use platform::password::Hasher;

use crate::application::config::AccountsConfig;
use crate::domain::entity::{Account, AccountFlags, CleanedAccount, NewAccount};
use crate::domain::entity::new_account::password_message;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{AccountId, AccountPassword, Email, RawPassword};
use crate::error::{AccountResult, ValidationErrors};

/// Account manager
pub struct AccountManager<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AccountsConfig>,
    hasher: Hasher,
}

impl<R> AccountManager<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountsConfig>) -> Self {
        let hasher = config.hasher();
        Self {
            repo,
            config,
            hasher,
        }
    }

    /// Lower-case the domain part, keep the local part as typed
    pub fn normalize_email(email: &str) -> String {
        Email::normalize(email)
    }

    /// Create an account with the flags carried by `input`
    pub async fn create_user(&self, input: NewAccount) -> AccountResult<Account> {
        let cleaned = input.clean(self.config.password_policy.as_ref())?;
        self.persist_new(cleaned).await
    }

    /// Create an account that is active, staff and superuser whatever flags
    /// `input` carries
    pub async fn create_superuser(&self, input: NewAccount) -> AccountResult<Account> {
        let mut cleaned = input.clean(self.config.password_policy.as_ref())?;
        cleaned.flags = AccountFlags::administrative();
        self.persist_new(cleaned).await
    }

    async fn persist_new(&self, cleaned: CleanedAccount) -> AccountResult<Account> {
        let CleanedAccount {
            email,
            password,
            flags,
        } = cleaned;

        let password = AccountPassword::hash(&password, &self.hasher)?;
        let account = Account::with_flags(email, password, flags);

        self.repo.create(&account).await?;

        tracing::info!(
            account_id = %account.account_id,
            kind = %account.kind(),
            is_active = account.is_active,
            "Account created"
        );

        Ok(account)
    }

    /// Look up by email after normalization; malformed input matches nothing
    pub async fn get_by_email(&self, email: &str) -> AccountResult<Option<Account>> {
        let Ok(email) = Email::new(email) else {
            return Ok(None);
        };
        self.repo.find_by_email(&email).await
    }

    pub async fn get(&self, account_id: &AccountId) -> AccountResult<Option<Account>> {
        self.repo.find_by_id(account_id).await
    }

    /// Persist direct field changes
    pub async fn save(&self, account: &Account) -> AccountResult<()> {
        self.repo.update(account).await?;

        tracing::debug!(account_id = %account.account_id, "Account saved");

        Ok(())
    }

    /// Replace the password with a fresh hash and persist
    pub async fn set_password(&self, account: &mut Account, password: &str) -> AccountResult<()> {
        let raw = RawPassword::new(password)
            .and_then(|raw| match &self.config.password_policy {
                Some(policy) => raw.check(policy).map(|_| raw),
                None => Ok(raw),
            })
            .map_err(|e| ValidationErrors::single("password", password_message(&e)))?;

        account.set_password(AccountPassword::hash(&raw, &self.hasher)?);
        self.repo.update(account).await?;

        tracing::info!(account_id = %account.account_id, "Password changed");

        Ok(())
    }

    /// Stamp `last_login` and persist
    pub async fn record_login(&self, account: &mut Account) -> AccountResult<()> {
        account.record_login();
        self.repo.update(account).await
    }
}

impl<R> Clone for AccountManager<R>
where
    R: AccountRepository,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            config: Arc::clone(&self.config),
            hasher: self.hasher.clone(),
        }
    }
}
