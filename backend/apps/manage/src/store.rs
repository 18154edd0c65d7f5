//! Backend selection by URL scheme

use accounts::domain::value_object::{AccountId, Email};
use accounts::{
    Account, AccountRepository, AccountResult, PgAccountRepository, SqliteAccountRepository,
};
use anyhow::{Result, bail};
use kernel::error::app_error::AppError;

#[derive(Clone)]
pub enum Store {
    Postgres(PgAccountRepository),
    Sqlite(SqliteAccountRepository),
}

impl Store {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let store = if database_url.starts_with("postgres://")
            || database_url.starts_with("postgresql://")
        {
            Store::Postgres(
                PgAccountRepository::connect(database_url)
                    .await
                    .map_err(AppError::from)?,
            )
        } else if database_url.starts_with("sqlite:") {
            Store::Sqlite(
                SqliteAccountRepository::connect(database_url)
                    .await
                    .map_err(AppError::from)?,
            )
        } else {
            bail!(
                AppError::invalid("Unsupported DATABASE_URL scheme")
                    .with_hint("Use a postgres://, postgresql:// or sqlite: URL")
            );
        };

        tracing::info!(backend = store.backend(), "Connected to database");

        Ok(store)
    }

    /// Driver name, for logs
    pub fn backend(&self) -> &'static str {
        match self {
            Store::Postgres(_) => "postgres",
            Store::Sqlite(_) => "sqlite",
        }
    }

    pub async fn migrate(&self) -> AccountResult<()> {
        match self {
            Store::Postgres(repo) => repo.migrate().await,
            Store::Sqlite(repo) => repo.migrate().await,
        }
    }
}

impl AccountRepository for Store {
    async fn create(&self, account: &Account) -> AccountResult<()> {
        match self {
            Store::Postgres(repo) => repo.create(account).await,
            Store::Sqlite(repo) => repo.create(account).await,
        }
    }

    async fn find_by_id(&self, account_id: &AccountId) -> AccountResult<Option<Account>> {
        match self {
            Store::Postgres(repo) => repo.find_by_id(account_id).await,
            Store::Sqlite(repo) => repo.find_by_id(account_id).await,
        }
    }

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<Account>> {
        match self {
            Store::Postgres(repo) => repo.find_by_email(email).await,
            Store::Sqlite(repo) => repo.find_by_email(email).await,
        }
    }

    async fn update(&self, account: &Account) -> AccountResult<()> {
        match self {
            Store::Postgres(repo) => repo.update(account).await,
            Store::Sqlite(repo) => repo.update(account).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unsupported_scheme() {
        let err = Store::connect("mysql://localhost/accounts").await.err().unwrap();
        let app_err = err.downcast_ref::<AppError>().unwrap();
        assert_eq!(app_err.kind(), kernel::error::kind::ErrorKind::Invalid);
    }

    #[tokio::test]
    async fn test_sqlite_memory() {
        let store = Store::connect("sqlite::memory:").await.unwrap();
        assert!(matches!(store, Store::Sqlite(_)));
        assert_eq!(store.backend(), "sqlite");
    }
}
