//! Mailer implementations
//!
//! The real transactional-email provider sits outside this crate; operators
//! plug it in through `ScriptMailer`, which hands a JSON payload to any
//! delivery command. `ConsoleMailer` prints the code for local development.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::domain::ports::Mailer;
use crate::domain::value_objects::{EmailAddress, VerificationCode};

/// Prints the code instead of delivering it; development only
pub struct ConsoleMailer;

impl Mailer for ConsoleMailer {
    fn send(&self, email: &EmailAddress, code: &VerificationCode) -> bool {
        println!("[mail] verification code for {email}: {code}");
        true
    }
}

/// Pipes a delivery payload to a configured command
///
/// The command receives `{"to": ..., "code": ...}` on stdin and reports
/// success through its exit status. Arguments are split on whitespace; the
/// recipient never appears on the command line.
pub struct ScriptMailer {
    command: String,
}

impl ScriptMailer {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn payload(email: &EmailAddress, code: &VerificationCode) -> String {
        serde_json::json!({
            "to": email.as_str(),
            "code": code.as_str(),
        })
        .to_string()
    }
}

impl Mailer for ScriptMailer {
    fn send(&self, email: &EmailAddress, code: &VerificationCode) -> bool {
        let mut parts = self.command.split_whitespace();
        let Some(program) = parts.next() else {
            return false;
        };

        let spawned = Command::new(program)
            .args(parts)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(_) => return false,
        };

        if let Some(mut stdin) = child.stdin.take() {
            if stdin
                .write_all(Self::payload(email, code).as_bytes())
                .is_err()
            {
                return false;
            }
        }

        matches!(child.wait(), Ok(status) if status.success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> EmailAddress {
        EmailAddress::parse("a@school.edu").unwrap()
    }

    fn code() -> VerificationCode {
        VerificationCode::from_submission("AB12CD34")
    }

    #[test]
    fn payload_contains_recipient_and_code() {
        let payload = ScriptMailer::payload(&email(), &code());
        assert!(payload.contains("a@school.edu"));
        assert!(payload.contains("AB12CD34"));
    }

    #[cfg(unix)]
    #[test]
    fn script_mailer_reports_exit_status() {
        assert!(ScriptMailer::new("true").send(&email(), &code()));
        assert!(!ScriptMailer::new("false").send(&email(), &code()));
    }

    #[test]
    fn missing_command_fails_delivery() {
        let mailer = ScriptMailer::new("definitely-not-a-real-binary");
        assert!(!mailer.send(&email(), &code()));
    }

    #[test]
    fn empty_command_fails_delivery() {
        let mailer = ScriptMailer::new("");
        assert!(!mailer.send(&email(), &code()));
    }
}
