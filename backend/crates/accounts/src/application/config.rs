//! Application Configuration
//!
//! Configuration for the Accounts application layer.

use platform::password::Hasher;

/// Re-export hashing and policy types from platform
pub use platform::password::{HashingParams, PasswordPolicy};

/// Accounts application configuration
#[derive(Debug, Clone, Default)]
pub struct AccountsConfig {
    /// Argon2id cost parameters for new hashes
    pub hashing: HashingParams,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Strength rules for new passwords; `None` only rejects blank input
    pub password_policy: Option<PasswordPolicy>,
}

impl AccountsConfig {
    /// Create config for development and tests (cheap hashing)
    pub fn development() -> Self {
        Self {
            hashing: HashingParams::minimal(),
            ..Default::default()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Hasher configured with these parameters and pepper
    pub fn hasher(&self) -> Hasher {
        Hasher::new(self.hashing, self.password_pepper.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_production_params() {
        let config = AccountsConfig::default();
        assert_eq!(config.hashing, HashingParams::default());
        assert!(config.pepper().is_none());
        assert!(config.password_policy.is_none());
    }

    #[test]
    fn test_development_is_cheap() {
        let config = AccountsConfig::development();
        assert_eq!(config.hasher().params(), HashingParams::minimal());
    }

    #[test]
    fn test_pepper() {
        let config = AccountsConfig {
            password_pepper: Some(b"pepper".to_vec()),
            ..AccountsConfig::development()
        };
        assert_eq!(config.pepper(), Some(&b"pepper"[..]));
    }
}
