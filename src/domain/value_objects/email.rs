//! EmailAddress value object
//!
//! Normalized form: lowercased and trimmed. Construction never fails for
//! non-empty input; domain checks happen against the allow-list, not here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{VerigateError, VerigateResult};

/// A normalized email address (lowercased, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parse an email address, normalizing case and whitespace.
    ///
    /// Empty input after trimming is rejected. A missing `@` is accepted
    /// here (the domain check treats it as not allowed) so that admin
    /// lookups on arbitrary input still work.
    pub fn parse(raw: &str) -> VerigateResult<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(VerigateError::InvalidInput(
                "email address must not be empty".to_string(),
            ));
        }
        Ok(Self(normalized))
    }

    /// The domain part (substring after `@`), if present
    pub fn domain(&self) -> Option<&str> {
        self.0.split_once('@').map(|(_, d)| d).filter(|d| !d.is_empty())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path/key-safe form used to name used-code records.
    ///
    /// `@` and `.` map to `_at_` and `_`; the exact address is stored inside
    /// the record itself, so this only needs to be collision-stable enough
    /// for prefix listing.
    pub fn sanitized(&self) -> String {
        self.0.replace('@', "_at_").replace('.', "_")
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        let email = EmailAddress::parse("  Jane.Doe@School.EDU ").unwrap();
        assert_eq!(email.as_str(), "jane.doe@school.edu");
    }

    #[test]
    fn parse_rejects_empty() {
        assert!(matches!(
            EmailAddress::parse("   "),
            Err(VerigateError::InvalidInput(_))
        ));
    }

    #[test]
    fn domain_extracts_part_after_at() {
        let email = EmailAddress::parse("a@school.edu").unwrap();
        assert_eq!(email.domain(), Some("school.edu"));
    }

    #[test]
    fn domain_is_none_without_at() {
        let email = EmailAddress::parse("not-an-email").unwrap();
        assert_eq!(email.domain(), None);
    }

    #[test]
    fn sanitized_is_key_safe() {
        let email = EmailAddress::parse("a.b@school.edu").unwrap();
        assert_eq!(email.sanitized(), "a_b_at_school_edu");
    }
}
