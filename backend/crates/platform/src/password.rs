//! Password Hashing and Verification
//!
//! - Argon2id hashing in PHC string format with a random salt per hash
//! - Optional application-wide pepper
//! - Zeroization of clear-text passwords
//! - Optional strength policy (NIST SP 800-63B lengths, common patterns)
//!
//! The only rule applied unconditionally is that a password is not blank.
//! Everything stricter lives in [`PasswordPolicy`] and is opt-in.

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length (NIST: SHALL be at least 8)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length (NIST: SHOULD permit at least 64)
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is empty or contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Password matches common patterns (sequential, repeated, keyboard walks)
    #[error("Password is too common or follows a predictable pattern")]
    CommonPattern,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Argon2 rejected the configured parameters
    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone`
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Wrap user input.
    ///
    /// The input is NFKC-normalized and the caller's buffer is wiped. Blank
    /// input is rejected; no other rule applies here.
    pub fn new(mut raw: String) -> Result<Self, PasswordPolicyError> {
        let password = Self(raw.nfkc().collect());
        raw.zeroize();

        if password.0.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        Ok(password)
    }

    /// Number of Unicode code points (not bytes)
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Password Policy
// ============================================================================

/// Optional strength rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub max_length: usize,
    pub reject_common_patterns: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
            max_length: MAX_PASSWORD_LENGTH,
            reject_common_patterns: true,
        }
    }
}

impl PasswordPolicy {
    /// Check a password against this policy
    pub fn check(&self, password: &ClearTextPassword) -> Result<(), PasswordPolicyError> {
        let char_count = password.char_count();

        if char_count < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min: self.min_length,
                actual: char_count,
            });
        }

        if char_count > self.max_length {
            return Err(PasswordPolicyError::TooLong {
                max: self.max_length,
                actual: char_count,
            });
        }

        if self.reject_common_patterns && is_common_pattern(password.as_str()) {
            return Err(PasswordPolicyError::CommonPattern);
        }

        Ok(())
    }
}

// ============================================================================
// Hashing
// ============================================================================

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashingParams {
    /// OWASP recommended profile: m=19456 (19 MiB), t=2, p=1
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashingParams {
    /// Cheapest parameters Argon2 accepts comfortably.
    ///
    /// For tests and local tooling only.
    pub const fn minimal() -> Self {
        Self {
            memory_kib: 256,
            iterations: 1,
            parallelism: 1,
        }
    }

    fn to_argon2(self) -> Result<Params, PasswordHashError> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| PasswordHashError::InvalidParams(e.to_string()))
    }
}

/// Configured password hasher
///
/// Holds the cost parameters and the optional pepper so call sites do not
/// have to thread them through.
#[derive(Clone)]
pub struct Hasher {
    params: HashingParams,
    pepper: Option<Vec<u8>>,
}

impl Hasher {
    pub fn new(params: HashingParams, pepper: Option<Vec<u8>>) -> Self {
        Self { params, pepper }
    }

    pub fn params(&self) -> HashingParams {
        self.params
    }

    /// Hash a password with a fresh 16-byte salt
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.to_argon2()?);
        let salt = SaltString::generate(OsRng);

        let hash = argon2
            .hash_password(&self.peppered(password), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }

    /// Verify a password against a stored hash.
    ///
    /// Parameters are read from the hash itself, so hashes made under older
    /// parameters still verify.
    pub fn verify(&self, hashed: &HashedPassword, password: &ClearTextPassword) -> bool {
        let parsed_hash = match PasswordHash::new(&hashed.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        // Argon2 uses constant-time comparison internally
        Argon2::default()
            .verify_password(&self.peppered(password), &parsed_hash)
            .is_ok()
    }

    /// True when the hash was made with another algorithm or other parameters
    pub fn needs_rehash(&self, hashed: &HashedPassword) -> bool {
        let parsed_hash = match PasswordHash::new(&hashed.hash) {
            Ok(h) => h,
            Err(_) => return true,
        };

        if parsed_hash.algorithm != Algorithm::Argon2id.ident() {
            return true;
        }

        match Params::try_from(&parsed_hash) {
            Ok(params) => {
                params.m_cost() != self.params.memory_kib
                    || params.t_cost() != self.params.iterations
                    || params.p_cost() != self.params.parallelism
            }
            Err(_) => true,
        }
    }

    /// Hash and discard.
    ///
    /// Keeps the cost of a lookup miss in line with a real verification.
    pub fn burn(&self, password: &ClearTextPassword) {
        let _ = self.hash(password);
    }

    fn peppered(&self, password: &ClearTextPassword) -> Zeroizing<Vec<u8>> {
        let mut bytes = password.as_bytes().to_vec();
        if let Some(pepper) = &self.pepper {
            bytes.extend_from_slice(pepper);
        }
        Zeroizing::new(bytes)
    }
}

impl fmt::Debug for Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hasher")
            .field("params", &self.params)
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// `$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// PHC algorithm identifier, e.g. `argon2id`
    pub fn algorithm(&self) -> &str {
        PasswordHash::new(&self.hash)
            .map(|h| h.algorithm.as_str())
            .unwrap_or_default()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn is_common_pattern(password: &str) -> bool {
    let lower = password.to_lowercase();

    // All same character (e.g., "aaaaaaaa")
    let mut chars = lower.chars();
    if let Some(first) = chars.next() {
        if lower.chars().count() >= 3 && chars.all(|c| c == first) {
            return true;
        }
    }

    if is_sequential_numbers(&lower) {
        return true;
    }

    const KEYBOARD_PATTERNS: &[&str] = &[
        "qwerty",
        "qwertyuiop",
        "asdfgh",
        "asdfghjkl",
        "zxcvbn",
        "qazwsx",
        "1qaz2wsx",
    ];

    if KEYBOARD_PATTERNS.iter().any(|p| lower.contains(p)) {
        return true;
    }

    const COMMON_PASSWORDS: &[&str] = &[
        "password",
        "password1",
        "password123",
        "12345678",
        "123456789",
        "1234567890",
        "abcdefgh",
        "letmein",
        "welcome",
        "admin123",
        "iloveyou",
        "sunshine",
        "princess",
        "football",
        "monkey",
        "shadow",
        "master",
        "dragon",
        "baseball",
        "trustno1",
    ];

    COMMON_PASSWORDS.contains(&lower.as_str())
}

fn is_sequential_numbers(s: &str) -> bool {
    let digits: Vec<u32> = s.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() < 4 || digits.len() != s.chars().count() {
        return false;
    }

    let is_ascending = digits
        .windows(2)
        .all(|w| w[1] == w[0] + 1 || (w[0] == 9 && w[1] == 0));

    let is_descending = digits
        .windows(2)
        .all(|w| w[0] == w[1] + 1 || (w[0] == 0 && w[1] == 9));

    is_ascending || is_descending
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn clear(s: &str) -> ClearTextPassword {
        ClearTextPassword::new(s.to_string()).unwrap()
    }

    fn hasher() -> Hasher {
        Hasher::new(HashingParams::minimal(), None)
    }

    #[test]
    fn test_password_empty() {
        let result = ClearTextPassword::new("".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::EmptyOrWhitespace)));
    }

    #[test]
    fn test_password_whitespace_only() {
        let result = ClearTextPassword::new("   \t ".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::EmptyOrWhitespace)));
    }

    #[test]
    fn test_short_password_accepted_without_policy() {
        assert!(ClearTextPassword::new("pw".to_string()).is_ok());
    }

    #[test]
    fn test_nfkc_normalization() {
        // U+FB01 LATIN SMALL LIGATURE FI normalizes to "fi"
        let ligature = clear("\u{FB01}ne");
        let plain = clear("fine");
        assert_eq!(ligature.as_str(), plain.as_str());
    }

    #[test]
    fn test_policy_lengths() {
        let policy = PasswordPolicy::default();

        let result = policy.check(&clear("short"));
        assert!(matches!(result, Err(PasswordPolicyError::TooShort { min: 8, actual: 5 })));

        let long = "a1".repeat(MAX_PASSWORD_LENGTH);
        let result = policy.check(&clear(&long));
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));

        assert!(policy.check(&clear("excellence in testing")).is_ok());
    }

    #[test]
    fn test_policy_common_patterns() {
        let policy = PasswordPolicy::default();

        for weak in ["password123", "qwertyuiop", "12345678", "87654321", "zzzzzzzzzz"] {
            assert_eq!(
                policy.check(&clear(weak)),
                Err(PasswordPolicyError::CommonPattern),
                "{weak} should be rejected"
            );
        }

        let lenient = PasswordPolicy {
            reject_common_patterns: false,
            ..PasswordPolicy::default()
        };
        assert!(lenient.check(&clear("password123")).is_ok());
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let password = clear("TestPassword123!");
        let hashed = hasher.hash(&password).unwrap();

        assert!(hasher.verify(&hashed, &password));
        assert!(!hasher.verify(&hashed, &clear("WrongPassword123!")));
    }

    #[test]
    fn test_salts_differ_algorithm_shared() {
        let hasher = hasher();
        let password = clear("excellence in testing");

        let first = hasher.hash(&password).unwrap();
        let second = hasher.hash(&password).unwrap();

        assert_ne!(first.as_phc_string(), second.as_phc_string());
        assert_eq!(first.algorithm(), "argon2id");
        assert_eq!(first.algorithm(), second.algorithm());
    }

    #[test]
    fn test_hash_with_pepper() {
        let password = clear("TestPassword123!");
        let peppered = Hasher::new(HashingParams::minimal(), Some(b"my_secret_pepper".to_vec()));
        let hashed = peppered.hash(&password).unwrap();

        assert!(peppered.verify(&hashed, &password));
        assert!(!hasher().verify(&hashed, &password));

        let wrong = Hasher::new(HashingParams::minimal(), Some(b"wrong_pepper".to_vec()));
        assert!(!wrong.verify(&hashed, &password));
    }

    #[test]
    fn test_needs_rehash() {
        let password = clear("TestPassword123!");
        let hashed = hasher().hash(&password).unwrap();

        assert!(!hasher().needs_rehash(&hashed));

        let stronger = Hasher::new(
            HashingParams {
                memory_kib: 512,
                ..HashingParams::minimal()
            },
            None,
        );
        assert!(stronger.needs_rehash(&hashed));
        // Old parameters still verify
        assert!(stronger.verify(&hashed, &password));
    }

    #[test]
    fn test_invalid_params() {
        let hasher = Hasher::new(
            HashingParams {
                memory_kib: 1,
                iterations: 1,
                parallelism: 1,
            },
            None,
        );
        let result = hasher.hash(&clear("TestPassword123!"));
        assert!(matches!(result, Err(PasswordHashError::InvalidParams(_))));
    }

    #[test]
    fn test_default_params_owasp_profile() {
        let params = HashingParams::default();
        assert_eq!(params.memory_kib, 19456);
        assert_eq!(params.iterations, 2);
        assert_eq!(params.parallelism, 1);
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let hasher = hasher();
        let password = clear("TestPassword123!");
        let hashed = hasher.hash(&password).unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(hasher.verify(&restored, &password));
    }

    #[test]
    fn test_invalid_phc_string() {
        let result = HashedPassword::from_phc_string("not_a_valid_hash");
        assert!(matches!(result, Err(PasswordHashError::InvalidHashFormat)));
    }

    #[test]
    fn test_debug_redaction() {
        let password = clear("secret");
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));

        let peppered = Hasher::new(HashingParams::minimal(), Some(b"pepper".to_vec()));
        assert!(!format!("{:?}", peppered).contains("112"));
        assert!(format!("{:?}", peppered).contains("REDACTED"));
    }
}
