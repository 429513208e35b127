//! Mailer port - the outbound email delivery sink
//!
//! The core never retries; a `false` return is surfaced to the requester and
//! the in-memory pending entry is rolled back so a retry starts clean.

use crate::domain::value_objects::{EmailAddress, VerificationCode};

pub trait Mailer: Send + Sync {
    /// Deliver a verification code. Returns whether delivery succeeded.
    fn send(&self, email: &EmailAddress, code: &VerificationCode) -> bool;
}

impl Mailer for Box<dyn Mailer> {
    fn send(&self, email: &EmailAddress, code: &VerificationCode) -> bool {
        self.as_ref().send(email, code)
    }
}

impl<T: Mailer> Mailer for std::sync::Arc<T> {
    fn send(&self, email: &EmailAddress, code: &VerificationCode) -> bool {
        self.as_ref().send(email, code)
    }
}
