//! Accounts Backend Module
//!
//! Email-keyed user accounts.
//!
//! Clean Architecture structure:
//! - `domain/` - Account entity, value objects, repository trait
//! - `application/` - Account manager, authentication backend, config
//! - `infra/` - PostgreSQL and SQLite implementations
//!
//! ## Features
//! - Email is the login identifier; the domain part is lower-cased on the way in
//! - Regular and administrative (staff + superuser) creation paths
//! - Authentication that answers "no match" for every kind of failure
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Clear text is zeroized on drop and never printed
//! - Lookup misses still pay for one hash
//! - Hashes made with outdated parameters are upgraded on login

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::{AccountManager, AccountsConfig, EmailBackend};
pub use domain::{Account, AccountFlags, AccountKind, AccountRepository, NewAccount};
pub use error::{AccountError, AccountResult, FieldError, ValidationErrors};
pub use infra::{PgAccountRepository, SqliteAccountRepository};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}
