//! Account Password Value Objects
//!
//! Domain wrappers over `platform::password`:
//! - [`RawPassword`]: user input, zeroized on drop, never printed
//! - [`AccountPassword`]: Argon2id PHC string, the only form ever stored

use platform::password::{
    ClearTextPassword, HashedPassword, Hasher, PasswordPolicy, PasswordPolicyError,
};
use std::fmt;

use crate::error::{AccountError, AccountResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Rejects blank input only
    pub fn new(raw: impl Into<String>) -> Result<Self, PasswordPolicyError> {
        ClearTextPassword::new(raw.into()).map(Self)
    }

    /// Apply an optional strength policy
    pub fn check(&self, policy: &PasswordPolicy) -> Result<(), PasswordPolicyError> {
        policy.check(&self.0)
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Account Password (Hashed, for storage)
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct AccountPassword(HashedPassword);

impl AccountPassword {
    /// Hash a raw password with a fresh salt
    pub fn hash(raw: &RawPassword, hasher: &Hasher) -> AccountResult<Self> {
        let hashed = hasher
            .hash(raw.inner())
            .map_err(|e| AccountError::Internal(e.to_string()))?;

        Ok(Self(hashed))
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> AccountResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string)
            .map_err(|_| AccountError::Internal("Invalid password hash in database".to_string()))?;

        Ok(Self(hashed))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Algorithm tag, e.g. `argon2id`
    pub fn algorithm(&self) -> &str {
        self.0.algorithm()
    }

    pub fn verify(&self, raw: &RawPassword, hasher: &Hasher) -> bool {
        hasher.verify(&self.0, raw.inner())
    }

    pub fn needs_rehash(&self, hasher: &Hasher) -> bool {
        hasher.needs_rehash(&self.0)
    }
}

impl fmt::Debug for AccountPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

impl fmt::Display for AccountPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[HASHED_PASSWORD]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::HashingParams;

    fn hasher() -> Hasher {
        Hasher::new(HashingParams::minimal(), None)
    }

    #[test]
    fn test_raw_password_blank() {
        assert!(RawPassword::new("").is_err());
        assert!(RawPassword::new("  ").is_err());
        assert!(RawPassword::new("pw").is_ok());
    }

    #[test]
    fn test_raw_password_policy() {
        let raw = RawPassword::new("pw").unwrap();
        assert!(matches!(
            raw.check(&PasswordPolicy::default()),
            Err(PasswordPolicyError::TooShort { .. })
        ));
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("excellence in testing").unwrap();
        let hashed = AccountPassword::hash(&raw, &hasher()).unwrap();

        assert!(hashed.verify(&raw, &hasher()));
        assert!(!hashed.verify(&RawPassword::new("EXCELLENCE IN TESTING").unwrap(), &hasher()));
        assert!(!hashed.needs_rehash(&hasher()));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let raw = RawPassword::new("excellence in testing").unwrap();
        let hashed = AccountPassword::hash(&raw, &hasher()).unwrap();

        let restored = AccountPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert_eq!(restored, hashed);
        assert!(AccountPassword::from_phc_string("plaintext").is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("SecretPassword123!").unwrap();
        let debug = format!("{:?}", raw);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("Secret"));

        let hashed = AccountPassword::hash(&raw, &hasher()).unwrap();
        assert!(format!("{:?}", hashed).contains("HASH"));
        assert_eq!(hashed.to_string(), "[HASHED_PASSWORD]");
    }
}
