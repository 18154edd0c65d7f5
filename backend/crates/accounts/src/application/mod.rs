//! Application Layer
//!
//! Account manager, authentication backend and configuration.

pub mod authentication;
pub mod config;
pub mod manager;

// Re-exports
pub use authentication::EmailBackend;
pub use config::AccountsConfig;
pub use manager::AccountManager;
