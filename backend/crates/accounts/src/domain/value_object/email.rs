//! Email Value Object
//!
//! A normalized, syntactically valid email address used as the login
//! identifier.
//!
//! ## Normalization
//! Surrounding whitespace is trimmed and the domain part is lower-cased. The
//! local part keeps its case: `TEST@EXAMPLE.COM` is stored as
//! `TEST@example.com`, and `test@example.com` is a different address.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use thiserror::Error;

/// Maximum email length (per RFC 5321)
pub const EMAIL_MAX_LENGTH: usize = 254;

const LOCAL_PART_MAX_LENGTH: usize = 64;
const DOMAIN_LABEL_MAX_LENGTH: usize = 63;

/// Characters allowed in a dot-atom local part besides ASCII alphanumerics
const LOCAL_PART_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~-";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("This field cannot be blank.")]
    Blank,

    #[error("Ensure this value has at most {max} characters (it has {actual}).")]
    TooLong { max: usize, actual: usize },

    #[error("Enter a valid email address.")]
    Invalid,
}

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Normalize and validate
    pub fn new(email: impl AsRef<str>) -> Result<Self, EmailError> {
        let email = Self::normalize(email.as_ref());

        if email.is_empty() {
            return Err(EmailError::Blank);
        }

        let length = email.chars().count();
        if length > EMAIL_MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: EMAIL_MAX_LENGTH,
                actual: length,
            });
        }

        let (local, domain) = email.rsplit_once('@').ok_or(EmailError::Invalid)?;
        if !is_valid_local_part(local) || !is_valid_domain(domain) {
            return Err(EmailError::Invalid);
        }

        Ok(Self(email))
    }

    /// Normalization alone, without validation.
    ///
    /// Input without an `@` is only trimmed.
    pub fn normalize(email: &str) -> String {
        let email = email.trim();
        match email.rsplit_once('@') {
            Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
            None => email.to_string(),
        }
    }

    /// Create from database value (assumed already validated)
    ///
    /// Crate-private: outside callers go through [`Email::new`], so every
    /// address that reaches `save` is normalized.
    ///
    /// ```compile_fail
    /// let _ = accounts::domain::value_object::Email::from_db("X@EXAMPLE.COM");
    /// ```
    pub(crate) fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to string for database storage
    pub fn into_db(self) -> String {
        self.0
    }

    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map(|(_, d)| d).unwrap_or("")
    }

    pub fn local_part(&self) -> &str {
        self.0.rsplit_once('@').map(|(l, _)| l).unwrap_or("")
    }
}

fn is_valid_local_part(local: &str) -> bool {
    if local.is_empty() || local.len() > LOCAL_PART_MAX_LENGTH {
        return false;
    }

    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }

    local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || LOCAL_PART_SPECIALS.contains(c))
}

fn is_valid_domain(domain: &str) -> bool {
    if domain == "localhost" {
        return true;
    }

    // Address literal: user@[192.0.2.1] or user@[IPv6:2001:db8::1]
    // (the domain is already lower-cased here)
    if let Some(literal) = domain.strip_prefix('[').and_then(|d| d.strip_suffix(']')) {
        return match literal.strip_prefix("ipv6:") {
            Some(v6) => v6.parse::<Ipv6Addr>().is_ok(),
            None => literal.parse::<Ipv4Addr>().is_ok(),
        };
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.chars().count() <= DOMAIN_LABEL_MAX_LENGTH
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    });
    if !labels_ok {
        return false;
    }

    // TLD: at least two characters, not purely numeric
    let tld = labels[labels.len() - 1];
    tld.chars().count() >= 2 && !tld.chars().all(|c| c.is_ascii_digit())
}

impl FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Email::new(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Email::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::new("user@example.com").is_ok());
        assert!(Email::new("user.name@example.co.jp").is_ok());
        assert!(Email::new("user+tag@example.com").is_ok());
        assert!(Email::new("o'brien@example.ie").is_ok());
        assert!(Email::new("admin@localhost").is_ok());
        assert!(Email::new("root@[192.0.2.1]").is_ok());
        assert!(Email::new("root@[IPv6:2001:db8::1]").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        assert_eq!(Email::new(""), Err(EmailError::Blank));
        assert_eq!(Email::new("   "), Err(EmailError::Blank));
        assert_eq!(Email::new("username"), Err(EmailError::Invalid));
        assert_eq!(Email::new("user@"), Err(EmailError::Invalid));
        assert_eq!(Email::new("@example.com"), Err(EmailError::Invalid));
        assert_eq!(Email::new("user@@example.com"), Err(EmailError::Invalid));
        assert_eq!(Email::new("user@example"), Err(EmailError::Invalid));
        assert_eq!(Email::new("user@example.c"), Err(EmailError::Invalid));
        assert_eq!(Email::new("user@example.123"), Err(EmailError::Invalid));
        assert_eq!(Email::new("user@-example.com"), Err(EmailError::Invalid));
        assert_eq!(Email::new(".user@example.com"), Err(EmailError::Invalid));
        assert_eq!(Email::new("us..er@example.com"), Err(EmailError::Invalid));
        assert_eq!(Email::new("us er@example.com"), Err(EmailError::Invalid));
        assert_eq!(Email::new("root@[999.0.0.1]"), Err(EmailError::Invalid));
    }

    #[test]
    fn test_email_too_long() {
        let email = format!("{}@{}.com", "a".repeat(64), "b".repeat(200));
        assert!(matches!(Email::new(email), Err(EmailError::TooLong { max: 254, .. })));
    }

    #[test]
    fn test_email_domain_lowercased_local_preserved() {
        let email = Email::new("TEST@EXAMPLE.COM").unwrap();
        assert_eq!(email.as_str(), "TEST@example.com");
        assert_eq!(email.local_part(), "TEST");
        assert_eq!(email.domain(), "example.com");
    }

    #[test]
    fn test_email_local_part_case_sensitive() {
        let upper = Email::new("Test@Example.com").unwrap();
        let lower = Email::new("test@example.com").unwrap();
        assert_ne!(upper, lower);
        assert_eq!(upper, Email::new("Test@EXAMPLE.COM").unwrap());
    }

    #[test]
    fn test_normalize_trims_and_handles_missing_at() {
        assert_eq!(Email::normalize("  Foo@BAR.org "), "Foo@bar.org");
        assert_eq!(Email::normalize("username"), "username");
        assert_eq!(Email::normalize("a@b@C.COM"), "a@b@c.com");
    }

    #[test]
    fn test_public_construction_always_normalizes() {
        let via_new = Email::new("X@EXAMPLE.COM").unwrap();
        let via_parse: Email = "X@EXAMPLE.COM".parse().unwrap();
        let via_serde: Email = serde_json::from_str("\"X@EXAMPLE.COM\"").unwrap();
        for email in [via_new, via_parse, via_serde] {
            assert_eq!(email.as_str(), "X@example.com");
        }
    }

    #[test]
    fn test_email_serde() {
        let email = Email::new("TEST@EXAMPLE.COM").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"TEST@example.com\"");

        let parsed: Email = serde_json::from_str("\"x@EXAMPLE.org\"").unwrap();
        assert_eq!(parsed.as_str(), "x@example.org");
        assert!(serde_json::from_str::<Email>("\"not an email\"").is_err());
    }
}
