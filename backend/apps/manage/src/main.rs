//! Account Administration Entry Point
//!
//! Uses `anyhow` for startup errors. Account errors are reported through
//! `kernel::error::AppError` and become the process exit code.

mod cli;
mod config;
mod store;

use std::process::ExitCode;
use std::sync::Arc;

use accounts::{Account, AccountManager, AccountsConfig, EmailBackend, NewAccount};
use anyhow::{Context, Result};
use clap::Parser;
use kernel::error::app_error::AppError;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};
use crate::config::ManageConfig;
use crate::store::Store;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing; stdout is reserved for JSON output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "manage=info,accounts=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ManageConfig::from_env()?;

    match run(cli.command, config).await {
        Ok(code) => Ok(code),
        Err(err) => match err.downcast_ref::<AppError>() {
            Some(app_err) => {
                tracing::debug!(kind = %app_err.kind(), exit_code = app_err.exit_code(), "Command failed");
                eprintln!("{app_err}");
                Ok(ExitCode::from(app_err.exit_code()))
            }
            None => Err(err),
        },
    }
}

async fn run(command: Command, config: ManageConfig) -> Result<ExitCode> {
    let ManageConfig {
        database_url,
        accounts: accounts_config,
        superuser_password,
    } = config;

    let store = Store::connect(&database_url).await?;

    let repo = Arc::new(store);
    let accounts_config: Arc<AccountsConfig> = Arc::new(accounts_config);
    let manager = AccountManager::new(Arc::clone(&repo), Arc::clone(&accounts_config));

    match command {
        Command::Migrate => {
            repo.migrate().await.map_err(AppError::from)?;
            tracing::info!(backend = repo.backend(), "Migrations applied");
            print_json(&json!({ "migrated": true }))?;
        }
        Command::CreateUser {
            email,
            password,
            inactive,
            staff,
        } => {
            let input = NewAccount::new(email, password)
                .active(!inactive)
                .staff(staff);
            let account = manager.create_user(input).await.map_err(AppError::from)?;
            tracing::info!(account_id = %account.account_id, "create-user finished");
            print_json(&account)?;
        }
        Command::CreateSuperuser { email, password } => {
            let password = password
                .or(superuser_password)
                .context("Pass --password or set ACCOUNTS_SUPERUSER_PASSWORD")?;
            let account = manager
                .create_superuser(NewAccount::new(email, password))
                .await
                .map_err(AppError::from)?;
            tracing::info!(account_id = %account.account_id, "create-superuser finished");
            print_json(&account)?;
        }
        Command::Authenticate { email, password } => {
            let backend = EmailBackend::new(Arc::clone(&repo), accounts_config);
            let authenticated = backend
                .authenticate(&email, &password)
                .await
                .map_err(AppError::from)?;

            let Some(mut account) = authenticated else {
                tracing::info!("authenticate: no match");
                print_json(&json!({ "authenticated": false }))?;
                return Ok(ExitCode::FAILURE);
            };

            manager.record_login(&mut account).await.map_err(AppError::from)?;
            tracing::info!(account_id = %account.account_id, "authenticate: matched");
            print_json(&json!({ "authenticated": true, "account": account }))?;
        }
        Command::Deactivate { email } => {
            let mut account = find(&manager, &email).await?;
            account.is_active = false;
            manager.save(&account).await.map_err(AppError::from)?;
            tracing::info!(account_id = %account.account_id, "Account deactivated");
            print_json(&account)?;
        }
        Command::ChangePassword { email, password } => {
            let mut account = find(&manager, &email).await?;
            manager
                .set_password(&mut account, &password)
                .await
                .map_err(AppError::from)?;
            tracing::info!(account_id = %account.account_id, "change-password finished");
            print_json(&account)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn find(manager: &AccountManager<Store>, email: &str) -> Result<Account> {
    let account = manager
        .get_by_email(email)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("No account with email {email}")))?;

    Ok(account)
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
