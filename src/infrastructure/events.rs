//! Console event sink
//!
//! Operational log lines on stderr; the default sink for the CLI.

use crate::domain::ports::{VerifyEvent, VerifyEventSink};

pub struct ConsoleEventSink;

impl VerifyEventSink for ConsoleEventSink {
    fn on_event(&self, event: VerifyEvent) {
        match event {
            VerifyEvent::CodeIssued { user_id, email } => {
                eprintln!("[verify] code issued to {email} for user {user_id}");
            }
            VerifyEvent::PendingAuditWriteFailed { user_id, error } => {
                eprintln!("[verify] audit write failed for user {user_id}: {error}");
            }
            VerifyEvent::Verified { user_id, email } => {
                eprintln!("[verify] user {user_id} verified as {email}");
            }
            VerifyEvent::VerificationReset {
                email,
                deleted_records,
                cleared_users,
            } => {
                eprintln!(
                    "[verify] reset {email}: {deleted_records} record(s) deleted, {} pending entr(ies) cleared",
                    cleared_users.len()
                );
            }
        }
    }
}
