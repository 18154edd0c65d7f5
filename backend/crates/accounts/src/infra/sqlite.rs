//! SQLite Repository Implementation
//!
//! Used by local tooling and the test suite.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::domain::entity::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{AccountId, Email};
use crate::error::{AccountError, AccountResult};
use crate::infra::row::AccountRow;

static MIGRATOR: Migrator = sqlx::migrate!("../../../database/migrations/sqlite");

/// SQLite-backed account repository
#[derive(Clone)]
pub struct SqliteAccountRepository {
    pool: SqlitePool,
}

impl SqliteAccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database file behind `database_url`
    pub async fn connect(database_url: &str) -> AccountResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        tracing::info!("Connected to SQLite");

        Ok(Self::new(pool))
    }

    /// Fresh, migrated in-memory database.
    ///
    /// A single connection that never expires: every connection to
    /// `sqlite::memory:` is its own database.
    pub async fn in_memory() -> AccountResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let repo = Self::new(pool);
        repo.migrate().await?;
        Ok(repo)
    }

    /// Apply embedded migrations
    pub async fn migrate(&self) -> AccountResult<()> {
        MIGRATOR.run(&self.pool).await?;

        tracing::info!("Migrations completed");

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl AccountRepository for SqliteAccountRepository {
    async fn create(&self, account: &Account) -> AccountResult<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                email,
                password_hash,
                is_active,
                is_staff,
                is_superuser,
                last_login,
                date_joined
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.email.as_str())
        .bind(account.password.as_phc_string())
        .bind(account.is_active)
        .bind(account.is_staff)
        .bind(account.is_superuser)
        .bind(account.last_login)
        .bind(account.date_joined)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> AccountResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                email,
                password_hash,
                is_active,
                is_staff,
                is_superuser,
                last_login,
                date_joined
            FROM accounts
            WHERE account_id = ?
            "#,
        )
        .bind(account_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                email,
                password_hash,
                is_active,
                is_staff,
                is_superuser,
                last_login,
                date_joined
            FROM accounts
            WHERE email = ?
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn update(&self, account: &Account) -> AccountResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE accounts SET
                email = ?,
                password_hash = ?,
                is_active = ?,
                is_staff = ?,
                is_superuser = ?,
                last_login = ?
            WHERE account_id = ?
            "#,
        )
        .bind(account.email.as_str())
        .bind(account.password.as_phc_string())
        .bind(account.is_active)
        .bind(account.is_staff)
        .bind(account.is_superuser)
        .bind(account.last_login)
        .bind(account.account_id.as_uuid())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(AccountError::NotFound);
        }

        Ok(())
    }
}
