//! Environment Configuration
//!
//! Reads `DATABASE_URL` and the `ACCOUNTS_*` variables into an
//! [`AccountsConfig`].

use std::env;

use accounts::application::config::{AccountsConfig, HashingParams};
use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose;

pub struct ManageConfig {
    pub database_url: String,
    pub accounts: AccountsConfig,
    /// Fallback for `create-superuser` without `--password`
    pub superuser_password: Option<String>,
}

impl ManageConfig {
    /// Load from the process environment (after `.env`)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let password_pepper = lookup("ACCOUNTS_PASSWORD_PEPPER")
            .map(|b64| {
                general_purpose::STANDARD
                    .decode(b64.trim())
                    .context("ACCOUNTS_PASSWORD_PEPPER must be base64")
            })
            .transpose()?;

        let defaults = HashingParams::default();
        let hashing = HashingParams {
            memory_kib: parse_u32(&lookup, "ACCOUNTS_ARGON2_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_u32(&lookup, "ACCOUNTS_ARGON2_ITERATIONS", defaults.iterations)?,
            parallelism: parse_u32(&lookup, "ACCOUNTS_ARGON2_PARALLELISM", defaults.parallelism)?,
        };

        Ok(Self {
            database_url,
            accounts: AccountsConfig {
                hashing,
                password_pepper,
                ..AccountsConfig::default()
            },
            superuser_password: lookup("ACCOUNTS_SUPERUSER_PASSWORD"),
        })
    }
}

fn parse_u32(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u32) -> Result<u32> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => match value.trim().parse::<u32>() {
            Ok(0) => bail!("{key} must be greater than zero"),
            Ok(n) => Ok(n),
            Err(_) => bail!("{key} must be a positive integer, got {value:?}"),
        },
    }
}
