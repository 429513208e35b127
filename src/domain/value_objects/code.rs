//! VerificationCode value object
//!
//! Eight uppercase hex characters from four random bytes. Codes are scoped
//! per user and short-lived, so collisions across users are acceptable.

use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Length of a generated verification code in characters
pub const CODE_LEN: usize = 8;

/// A single-use verification code, stored uppercase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Generate a fresh code from the OS random source
    pub fn generate() -> Self {
        let mut bytes = [0u8; CODE_LEN / 2];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        let mut code = String::with_capacity(CODE_LEN);
        for b in bytes {
            code.push_str(&format!("{:02X}", b));
        }
        Self(code)
    }

    /// Normalize a user-submitted code for comparison
    pub fn from_submission(raw: &str) -> Self {
        Self(raw.trim().to_uppercase())
    }

    /// Case-insensitive match against another code
    pub fn matches(&self, other: &VerificationCode) -> bool {
        self.0 == other.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
