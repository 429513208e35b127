//! Serve command - the line-oriented dispatcher
//!
//! Reads one request per line from stdin and replies on stdout. This is the
//! inbound RPC surface a gateway process drives; the engine and its pending
//! map live for the whole session.
//!
//! Requests:
//!   verify <user> <email> [verified]
//!   code <user> <code>
//!   check <email>
//!   reset <email>
//!   domains
//!   quit

use std::io::{BufRead, Write};

use anyhow::Result;

use verigate::application::StartOutcome;

use super::Engine;

pub fn cmd_serve(engine: &Engine) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    serve_loop(engine, stdin.lock(), stdout.lock())
}

fn serve_loop(engine: &Engine, input: impl BufRead, mut output: impl Write) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        let reply = match handle_request(engine, line.trim()) {
            Request::Reply(text) => text,
            Request::Quit => break,
        };
        writeln!(output, "{reply}")?;
        output.flush()?;
    }
    Ok(())
}

enum Request {
    Reply(String),
    Quit,
}

fn handle_request(engine: &Engine, line: &str) -> Request {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let reply = match tokens.as_slice() {
        [] => "error: empty request".to_string(),
        ["quit"] => return Request::Quit,
        ["verify", user, email] => start(engine, user, email, false),
        ["verify", user, email, "verified"] => start(engine, user, email, true),
        ["code", user, code] => match engine.submit_code(user, code) {
            Ok(success) => format!("ok: verified {}", success.email),
            Err(err) => format!("error: {err}"),
        },
        ["check", email] => match engine.check_email(email) {
            Ok(report) => format!(
                "ok: {} used {}/{} allowed={}",
                report.email, report.count, report.max_allowed, report.domain_allowed
            ),
            Err(err) => format!("error: {err}"),
        },
        ["reset", email] => match engine.reset_email(email) {
            Ok(report) => format!(
                "ok: reset {} ({} record(s) deleted)",
                report.email, report.deleted_records
            ),
            Err(err) => format!("error: {err}"),
        },
        ["domains"] => match engine.list_domains() {
            Ok(domains) => format!("ok: {}", domains.join(", ")),
            Err(err) => format!("error: {err}"),
        },
        _ => format!("error: unknown request '{line}'"),
    };
    Request::Reply(reply)
}

fn start(engine: &Engine, user: &str, email: &str, already_verified: bool) -> String {
    match engine.start_verification(user, email, already_verified) {
        Ok(StartOutcome::AlreadyVerified) => "ok: already verified".to_string(),
        Ok(StartOutcome::CodeSent { email }) => format!("ok: code sent to {email}"),
        Err(err) => format!("error: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use verigate::application::{EngineSettings, VerificationEngine};
    use verigate::config::StorageConfig;
    use verigate::domain::ports::{Mailer, NoopEventSink};
    use verigate::infrastructure::{build_code_store, build_domain_repository, ConsoleMailer};

    fn engine(dir: &std::path::Path) -> Engine {
        let storage = StorageConfig {
            data_dir: dir.to_path_buf(),
            ..Default::default()
        };
        let mailer: Box<dyn Mailer> = Box::new(ConsoleMailer);
        VerificationEngine::new(
            build_domain_repository(&storage),
            build_code_store(&storage),
            mailer,
            Arc::new(NoopEventSink),
            EngineSettings::default(),
        )
    }

    #[test]
    fn serve_loop_replies_per_line_and_quits() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(dir.path());
        engine.add_domain("school.edu").unwrap();

        let input = b"domains\ncheck a@school.edu\nquit\nverify u1 a@school.edu\n" as &[u8];
        let mut output = Vec::new();
        serve_loop(&engine, input, &mut output).unwrap();

        let replies: Vec<String> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        // Nothing after quit is processed.
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0], "ok: school.edu");
        assert_eq!(replies[1], "ok: a@school.edu used 0/2 allowed=true");
    }

    #[test]
    fn unknown_request_is_an_error_reply() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(dir.path());
        match handle_request(&engine, "frobnicate") {
            Request::Reply(reply) => assert!(reply.starts_with("error: unknown request")),
            Request::Quit => panic!("should not quit"),
        }
    }

    #[test]
    fn verify_with_verified_flag_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(dir.path());
        engine.add_domain("school.edu").unwrap();
        match handle_request(&engine, "verify u1 a@school.edu verified") {
            Request::Reply(reply) => assert_eq!(reply, "ok: already verified"),
            Request::Quit => panic!("should not quit"),
        }
    }

    #[test]
    fn full_flow_over_the_line_protocol() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(dir.path());
        engine.add_domain("school.edu").unwrap();

        let Request::Reply(reply) = handle_request(&engine, "verify u1 a@school.edu") else {
            panic!("should reply");
        };
        assert_eq!(reply, "ok: code sent to a@school.edu");

        // Recover the issued code from the pending audit record on disk.
        let pending: verigate::PendingVerification = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("pending_codes/u1.json")).unwrap(),
        )
        .unwrap();

        let Request::Reply(reply) =
            handle_request(&engine, &format!("code u1 {}", pending.code.as_str()))
        else {
            panic!("should reply");
        };
        assert_eq!(reply, "ok: verified a@school.edu");
    }
}
