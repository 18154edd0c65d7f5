//! PostgreSQL Repository Implementation

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use crate::domain::entity::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{AccountId, Email};
use crate::error::{AccountError, AccountResult};
use crate::infra::row::AccountRow;

static MIGRATOR: Migrator = sqlx::migrate!("../../../database/migrations/postgres");

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> AccountResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        tracing::info!("Connected to PostgreSQL");

        Ok(Self::new(pool))
    }

    /// Apply embedded migrations
    pub async fn migrate(&self) -> AccountResult<()> {
        MIGRATOR.run(&self.pool).await?;

        tracing::info!("Migrations completed");

        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl AccountRepository for PgAccountRepository {
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
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
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
            WHERE account_id = $1
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
            WHERE email = $1
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
                email = $2,
                password_hash = $3,
                is_active = $4,
                is_staff = $5,
                is_superuser = $6,
                last_login = $7
            WHERE account_id = $1
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.email.as_str())
        .bind(account.password.as_phc_string())
        .bind(account.is_active)
        .bind(account.is_staff)
        .bind(account.is_superuser)
        .bind(account.last_login)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(AccountError::NotFound);
        }

        Ok(())
    }
}
