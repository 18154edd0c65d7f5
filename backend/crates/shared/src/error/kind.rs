//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum. Kinds are transport-neutral; the only
//! outward mapping carried here is the process exit code used by binaries
//! (BSD `sysexits.h` values).

use serde::Serialize;

/// Error classification
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::Conflict;
/// assert_eq!(kind.exit_code(), 73);
/// assert_eq!(kind.as_str(), "conflict");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Input failed validation
    Invalid,
    NotFound,
    /// Conflicts with stored state (e.g. unique key)
    Conflict,
    /// Backing service unreachable or exhausted; retrying may help
    Unavailable,
    Internal,
}

impl ErrorKind {
    /// `sysexits.h` code for this kind
    #[inline]
    pub const fn exit_code(&self) -> u8 {
        match self {
            ErrorKind::Invalid => 65,     // EX_DATAERR
            ErrorKind::NotFound => 67,    // EX_NOUSER
            ErrorKind::Conflict => 73,    // EX_CANTCREAT
            ErrorKind::Unavailable => 69, // EX_UNAVAILABLE
            ErrorKind::Internal => 70,    // EX_SOFTWARE
        }
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Invalid => "invalid",
            ErrorKind::NotFound => "not found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Unavailable => "unavailable",
            ErrorKind::Internal => "internal error",
        }
    }

    /// The caller can fix it by changing the input
    #[inline]
    pub const fn is_caller_fault(&self) -> bool {
        matches!(
            self,
            ErrorKind::Invalid | ErrorKind::NotFound | ErrorKind::Conflict
        )
    }

    #[inline]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Unavailable)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_distinct_and_nonzero() {
        let kinds = [
            ErrorKind::Invalid,
            ErrorKind::NotFound,
            ErrorKind::Conflict,
            ErrorKind::Unavailable,
            ErrorKind::Internal,
        ];
        let mut codes: Vec<u8> = kinds.iter().map(ErrorKind::exit_code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
        assert!(codes.iter().all(|&c| c >= 64));
    }

    #[test]
    fn test_caller_fault() {
        assert!(ErrorKind::Invalid.is_caller_fault());
        assert!(ErrorKind::Conflict.is_caller_fault());
        assert!(!ErrorKind::Internal.is_caller_fault());
        assert!(!ErrorKind::Unavailable.is_caller_fault());
    }

    #[test]
    fn test_retryable() {
        assert!(ErrorKind::Unavailable.is_retryable());
        assert!(!ErrorKind::Conflict.is_retryable());
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorKind::NotFound).unwrap();
        assert_eq!(json, "\"NOT_FOUND\"");
    }
}
