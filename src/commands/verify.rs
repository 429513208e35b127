//! One-shot verify command handler

use anyhow::Result;

use verigate::application::StartOutcome;
use verigate::error::VerigateError;

use super::Engine;

pub fn cmd_verify(
    engine: &Engine,
    user: &str,
    email: &str,
    already_verified: bool,
) -> Result<()> {
    match engine.start_verification(user, email, already_verified) {
        Ok(StartOutcome::AlreadyVerified) => {
            println!("You're already verified; nothing to do.");
            Ok(())
        }
        Ok(StartOutcome::CodeSent { email }) => {
            println!(
                "A verification code was sent to {email}. Check your inbox (and spam folder), \
                 then submit it with the code command."
            );
            Ok(())
        }
        Err(err) => {
            print_verify_error(&err);
            // Per-request failures are user outcomes, not process failures.
            Ok(())
        }
    }
}

/// Render an engine error as the user-facing reply line
pub fn print_verify_error(err: &VerigateError) {
    match err {
        VerigateError::DomainNotAllowed { allowed } => {
            println!(
                "Sorry, only email addresses from these domains are accepted: {}.",
                allowed.join(", ")
            );
        }
        VerigateError::VerificationCapReached { max } => {
            println!(
                "This email has reached the maximum of {max} verifications. \
                 An admin can reset it with: admin reset-email"
            );
        }
        VerigateError::Throttled { wait } => {
            println!("You recently requested a code. Please wait {wait} before requesting another.");
        }
        VerigateError::CodeMismatch { attempts_left } => {
            println!(
                "That code doesn't match. You have {attempts_left} attempt(s) left; \
                 double-check it or request a new code."
            );
        }
        other => println!("{other}"),
    }
}
