//! Verification event port
//!
//! Observable interface for the engine. Carries both operational reporting
//! (audit write failures) and the post-success hook (`Verified`), which is
//! best-effort: sink failures never roll back a committed result.

use crate::domain::value_objects::EmailAddress;

/// Event emitted by the verification engine
#[derive(Debug, Clone)]
pub enum VerifyEvent {
    /// A code was generated and handed to the delivery sink
    CodeIssued { user_id: String, email: EmailAddress },

    /// The best-effort audit write for a pending code failed
    PendingAuditWriteFailed { user_id: String, error: String },

    /// A user completed verification; signal for role grant / welcome message
    Verified { user_id: String, email: EmailAddress },

    /// An admin reset removed records and cleared in-memory entries
    VerificationReset {
        email: EmailAddress,
        deleted_records: u32,
        cleared_users: Vec<String>,
    },
}

/// Trait for receiving verification events
///
/// Implementations can be:
/// - ConsoleEventSink: operational log lines on stderr
/// - NoopEventSink: silent operation
/// - test sinks that record events
pub trait VerifyEventSink: Send + Sync {
    fn on_event(&self, event: VerifyEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl VerifyEventSink for NoopEventSink {
    fn on_event(&self, _event: VerifyEvent) {
        // Do nothing
    }
}
