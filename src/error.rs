//! Error types for Verigate
//!
//! Uses `thiserror` for library errors. Every variant here is a per-request
//! failure; nothing in this taxonomy is fatal to the process.

use thiserror::Error;

/// Result type alias for Verigate operations
pub type VerigateResult<T> = Result<T, VerigateError>;

/// Main error type for Verigate operations
#[derive(Error, Debug)]
pub enum VerigateError {
    /// Malformed domain, email, or code input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Email domain is not on the allow-list
    #[error("domain not allowed; accepted domains: {}", allowed.join(", "))]
    DomainNotAllowed { allowed: Vec<String> },

    /// Email has reached its maximum number of successful verifications
    #[error("email has reached the maximum of {max} verifications")]
    VerificationCapReached { max: u32 },

    /// A code was issued too recently for this user
    #[error("a code was recently requested; wait {wait} before requesting another")]
    Throttled { wait: String },

    /// No pending verification exists for the user
    #[error("no pending verification found; request a code first")]
    NoPendingRequest,

    /// The pending code has expired
    #[error("verification code has expired; request a new one")]
    CodeExpired,

    /// Too many incorrect submissions for the pending code
    #[error("too many incorrect attempts; request a new code")]
    TooManyAttempts,

    /// Submitted code does not match the issued one
    #[error("code does not match; {attempts_left} attempt(s) left")]
    CodeMismatch { attempts_left: u32 },

    /// Storage backend could not be read
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Storage backend rejected a critical write
    #[error("could not persist verification state: {0}")]
    Persistence(String),

    /// Removing this domain would empty the allow-list
    #[error("cannot remove the last allowed domain; add another domain first")]
    LastDomain,

    /// No records exist for the given key
    #[error("no records found for {0}")]
    NotFound(String),

    /// The email delivery sink reported failure
    #[error("could not deliver the verification email; try again later")]
    DeliveryFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_not_allowed_lists_domains() {
        let err = VerigateError::DomainNotAllowed {
            allowed: vec!["school.edu".to_string(), "college.edu".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "domain not allowed; accepted domains: school.edu, college.edu"
        );
    }

    #[test]
    fn test_code_mismatch_reports_attempts_left() {
        let err = VerigateError::CodeMismatch { attempts_left: 2 };
        assert!(err.to_string().contains("2 attempt(s) left"));
    }

    #[test]
    fn test_throttled_carries_formatted_wait() {
        let err = VerigateError::Throttled {
            wait: "4 minutes and 30 seconds".to_string(),
        };
        assert!(err.to_string().contains("4 minutes and 30 seconds"));
    }
}
