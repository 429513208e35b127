//! Pending verification and used-code records
//!
//! `PendingVerification` lives in the engine's in-memory map for the
//! lifetime of one issued code. `UsedCodeRecord` is the durable, append-only
//! proof of redemption the per-email cap is computed from.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{EmailAddress, VerificationCode};

/// Maximum number of code submissions before the pending entry is discarded
pub const MAX_ATTEMPTS: u32 = 3;

/// One in-flight verification for a single user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingVerification {
    pub email: EmailAddress,
    pub code: VerificationCode,
    pub created_at: DateTime<Utc>,
    pub attempts: u32,
}

impl PendingVerification {
    pub fn new(email: EmailAddress, code: VerificationCode, now: DateTime<Utc>) -> Self {
        Self {
            email,
            code,
            created_at: now,
            attempts: 0,
        }
    }

    /// Age of this entry at `now`
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.created_at
    }

    /// Whether the code has outlived the expiry window
    pub fn is_expired(&self, now: DateTime<Utc>, expiry: Duration) -> bool {
        self.age(now) > expiry
    }

    /// Record one submission attempt and report whether the entry is spent
    pub fn register_attempt(&mut self) -> bool {
        self.attempts += 1;
        self.attempts > MAX_ATTEMPTS
    }

    pub fn attempts_left(&self) -> u32 {
        MAX_ATTEMPTS.saturating_sub(self.attempts)
    }
}

/// Durable proof that a code was redeemed for an email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsedCodeRecord {
    pub email: EmailAddress,
    pub code: VerificationCode,
    pub user_id: String,
    pub consumed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(created_secs_ago: i64) -> PendingVerification {
        let now = Utc::now();
        PendingVerification::new(
            EmailAddress::parse("a@school.edu").unwrap(),
            VerificationCode::from_submission("AB12CD34"),
            now - Duration::seconds(created_secs_ago),
        )
    }

    #[test]
    fn fresh_entry_is_not_expired() {
        let entry = pending(0);
        assert!(!entry.is_expired(Utc::now(), Duration::minutes(30)));
    }

    #[test]
    fn old_entry_is_expired() {
        let entry = pending(31 * 60);
        assert!(entry.is_expired(Utc::now(), Duration::minutes(30)));
    }

    #[test]
    fn attempts_exhaust_after_limit() {
        let mut entry = pending(0);
        assert!(!entry.register_attempt());
        assert_eq!(entry.attempts_left(), 2);
        assert!(!entry.register_attempt());
        assert!(!entry.register_attempt());
        assert_eq!(entry.attempts_left(), 0);
        // Fourth submission exceeds the limit
        assert!(entry.register_attempt());
    }
}
