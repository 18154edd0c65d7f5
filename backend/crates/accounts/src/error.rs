//! Account Error Types
//!
//! Account-specific errors. They convert into the unified
//! `kernel::error::AppError` at the edge of the system.
//!
//! Failed authentication is deliberately absent: the backend reports it as
//! `Ok(None)`.

use std::borrow::Cow;
use std::fmt;

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

#[derive(Debug, Error)]
pub enum AccountError {
    /// One or more fields failed validation before anything was persisted
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// The store rejected a second account with the same normalized email
    #[error("An account with this email already exists")]
    DuplicateEmail,

    #[error("Account not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AccountError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            // email is the only unique column besides the generated key
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AccountError::DuplicateEmail
            }
            _ => AccountError::Database(err),
        }
    }
}

impl AccountError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::Validation(_) => ErrorKind::Invalid,
            AccountError::DuplicateEmail => ErrorKind::Conflict,
            AccountError::NotFound => ErrorKind::NotFound,
            AccountError::Database(
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_),
            ) => ErrorKind::Unavailable,
            AccountError::Database(_) | AccountError::Migration(_) | AccountError::Internal(_) => {
                ErrorKind::Internal
            }
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AccountError::Validation(_))
    }

    /// Validation details, if this is a validation failure
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            AccountError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Log at a level matching severity, then convert
    pub fn into_app_error(self) -> AppError {
        self.log();
        match self {
            AccountError::Validation(errors) => {
                AppError::invalid(errors.to_string()).with_hint("Correct the listed fields")
            }
            AccountError::DuplicateEmail => {
                AppError::conflict("An account with this email already exists")
                    .with_hint("Use another email address")
            }
            AccountError::NotFound => AppError::not_found("Account not found"),
            AccountError::Database(e) => AppError::from(e),
            AccountError::Migration(e) => {
                AppError::internal("Database migration failed").with_source(e)
            }
            AccountError::Internal(msg) => AppError::internal(msg),
        }
    }

    fn log(&self) {
        match self {
            AccountError::Database(e) => {
                tracing::error!(error = %e, "Account database error");
            }
            AccountError::Migration(e) => {
                tracing::error!(error = %e, "Account migration error");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::DuplicateEmail => {
                tracing::warn!("Duplicate account email rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        err.into_app_error()
    }
}

// ============================================================================
// Field validation errors
// ============================================================================

/// A single field's failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: Cow<'static, str>,
}

/// Every field failure found in one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<Cow<'static, str>>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn messages_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
