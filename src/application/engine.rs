//! Verification engine - the per-user state machine
//!
//! Owns the single in-memory map of pending verifications and drives every
//! state transition: issue, throttle, expire, exhaust, redeem. The map is a
//! resumability cache, not a system of record; durable state lives behind
//! the `DomainRepository` and `CodeStore` ports and does not restore pending
//! entries across restarts.
//!
//! The per-email cap check and the eventual `move_to_used` write are not a
//! cross-process transaction: two users racing to redeem codes for the same
//! email can both succeed and exceed the cap by one. Accepted best-effort
//! behavior, kept intentionally.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::{PendingVerification, UsedCodeRecord};
use crate::domain::ports::{
    CodeStore, DomainRepository, Mailer, StorageError, VerifyEvent, VerifyEventSink,
};
use crate::domain::value_objects::{EmailAddress, VerificationCode};
use crate::error::{VerigateError, VerigateResult};

use super::outcome::{
    DomainAddOutcome, EmailReport, ResetReport, StartOutcome, StorageInfo, VerifiedSuccess,
};

/// Tunable limits for the engine
#[derive(Debug, Clone, Copy)]
pub struct EngineSettings {
    /// Successful redemptions allowed per email address
    pub max_verifications_per_email: u32,
    /// Minimum time between code issuances for one user
    pub throttle: Duration,
    /// How long an issued code stays valid
    pub expiry: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_verifications_per_email: 2,
            throttle: Duration::minutes(5),
            expiry: Duration::minutes(30),
        }
    }
}

/// Verification engine, parameterized by its ports
pub struct VerificationEngine<DR, CS, M>
where
    DR: DomainRepository,
    CS: CodeStore,
    M: Mailer,
{
    domains: DR,
    codes: CS,
    mailer: M,
    events: Arc<dyn VerifyEventSink>,
    settings: EngineSettings,
    pending: Mutex<HashMap<String, PendingVerification>>,
}

impl<DR, CS, M> VerificationEngine<DR, CS, M>
where
    DR: DomainRepository,
    CS: CodeStore,
    M: Mailer,
{
    pub fn new(
        domains: DR,
        codes: CS,
        mailer: M,
        events: Arc<dyn VerifyEventSink>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            domains,
            codes,
            mailer,
            events,
            settings,
            pending: Mutex::new(HashMap::new()),
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Start a verification for `user_id` with the given email.
    ///
    /// `already_verified` is the caller's membership state; the gateway owns
    /// that knowledge, the engine only honors it as a no-op.
    pub fn start_verification(
        &self,
        user_id: &str,
        raw_email: &str,
        already_verified: bool,
    ) -> VerigateResult<StartOutcome> {
        self.start_verification_at(user_id, raw_email, already_verified, Utc::now())
    }

    /// `start_verification` with an explicit timestamp
    pub fn start_verification_at(
        &self,
        user_id: &str,
        raw_email: &str,
        already_verified: bool,
        now: DateTime<Utc>,
    ) -> VerigateResult<StartOutcome> {
        if already_verified {
            return Ok(StartOutcome::AlreadyVerified);
        }

        let email = EmailAddress::parse(raw_email)?;

        // Fail closed: an unreadable allow-list rejects, never admits.
        let allowed = self.domains.load().map_err(storage_unavailable)?;
        if !allowed.is_allowed(&email) {
            return Err(VerigateError::DomainNotAllowed {
                allowed: allowed.list(),
            });
        }

        let count = self
            .codes
            .count_for_email(&email)
            .map_err(storage_unavailable)?;
        if count >= self.settings.max_verifications_per_email {
            return Err(VerigateError::VerificationCapReached {
                max: self.settings.max_verifications_per_email,
            });
        }

        {
            let pending = self.pending.lock().unwrap();
            if let Some(existing) = pending.get(user_id) {
                let elapsed = existing.age(now);
                if elapsed < self.settings.throttle {
                    return Err(VerigateError::Throttled {
                        wait: format_wait(self.settings.throttle - elapsed),
                    });
                }
            }
        }

        let code = VerificationCode::generate();
        let entry = PendingVerification::new(email.clone(), code.clone(), now);

        // Overwrite semantics enforce at most one pending entry per user.
        self.pending
            .lock()
            .unwrap()
            .insert(user_id.to_string(), entry.clone());

        // Audit copy only; a failed write must not block the code.
        if let Err(err) = self.codes.save_pending(user_id, &entry) {
            self.events.on_event(VerifyEvent::PendingAuditWriteFailed {
                user_id: user_id.to_string(),
                error: err.to_string(),
            });
        }

        if !self.mailer.send(&email, &code) {
            // Roll back so the user can retry immediately instead of being
            // throttled behind an entry whose code was never delivered.
            self.pending.lock().unwrap().remove(user_id);
            return Err(VerigateError::DeliveryFailed);
        }

        self.events.on_event(VerifyEvent::CodeIssued {
            user_id: user_id.to_string(),
            email: email.clone(),
        });

        Ok(StartOutcome::CodeSent { email })
    }

    /// Redeem a submitted code for `user_id`
    pub fn submit_code(&self, user_id: &str, raw_code: &str) -> VerigateResult<VerifiedSuccess> {
        self.submit_code_at(user_id, raw_code, Utc::now())
    }

    /// `submit_code` with an explicit timestamp
    pub fn submit_code_at(
        &self,
        user_id: &str,
        raw_code: &str,
        now: DateTime<Utc>,
    ) -> VerigateResult<VerifiedSuccess> {
        let mut pending = self.pending.lock().unwrap();

        let entry = pending
            .get_mut(user_id)
            .ok_or(VerigateError::NoPendingRequest)?;

        if entry.is_expired(now, self.settings.expiry) {
            pending.remove(user_id);
            return Err(VerigateError::CodeExpired);
        }

        if entry.register_attempt() {
            pending.remove(user_id);
            return Err(VerigateError::TooManyAttempts);
        }

        let submitted = VerificationCode::from_submission(raw_code);
        if !submitted.matches(&entry.code) {
            return Err(VerigateError::CodeMismatch {
                attempts_left: entry.attempts_left(),
            });
        }

        let record = UsedCodeRecord {
            email: entry.email.clone(),
            code: entry.code.clone(),
            user_id: user_id.to_string(),
            consumed_at: now,
        };

        // Persist before clearing the in-memory entry: if the write fails the
        // user keeps their pending slot and can resubmit the correct code.
        if let Err(err) = self.codes.move_to_used(&record) {
            return Err(VerigateError::Persistence(err.to_string()));
        }

        let email = entry.email.clone();
        pending.remove(user_id);
        drop(pending);

        // Best-effort post-success hook; the redemption is already committed.
        self.events.on_event(VerifyEvent::Verified {
            user_id: user_id.to_string(),
            email: email.clone(),
        });

        Ok(VerifiedSuccess { email })
    }

    /// Current allow-list, fail-closed on backend errors
    pub fn list_domains(&self) -> VerigateResult<Vec<String>> {
        let domains = self.domains.load().map_err(storage_unavailable)?;
        Ok(domains.list())
    }

    /// Add a domain to the allow-list and persist the whole set
    pub fn add_domain(&self, raw: &str) -> VerigateResult<DomainAddOutcome> {
        let mut domains = self.domains.load().map_err(storage_unavailable)?;
        let outcome = domains.add(raw)?;
        if outcome == crate::domain::entities::AddOutcome::Added {
            self.domains.save(&domains).map_err(persistence)?;
        }
        Ok(outcome.into())
    }

    /// Remove a domain, refusing to empty the set
    pub fn remove_domain(&self, raw: &str) -> VerigateResult<()> {
        let mut domains = self.domains.load().map_err(storage_unavailable)?;
        domains.remove(raw)?;
        self.domains.save(&domains).map_err(persistence)?;
        Ok(())
    }

    /// Pure read composing the used-code count and the domain check
    pub fn check_email(&self, raw_email: &str) -> VerigateResult<EmailReport> {
        let email = EmailAddress::parse(raw_email)?;
        let count = self
            .codes
            .count_for_email(&email)
            .map_err(storage_unavailable)?;
        let domains = self.domains.load().map_err(storage_unavailable)?;
        Ok(EmailReport {
            domain_allowed: domains.is_allowed(&email),
            backend: self.codes.info().used.kind,
            count,
            max_allowed: self.settings.max_verifications_per_email,
            email,
        })
    }

    /// Delete every record for the email and clear matching in-memory
    /// entries across all users, so the reset takes effect immediately.
    pub fn reset_email(&self, raw_email: &str) -> VerigateResult<ResetReport> {
        let email = EmailAddress::parse(raw_email)?;
        let deleted = self.codes.reset(&email).map_err(|err| match err {
            StorageError::NotFound(_) => VerigateError::NotFound(email.to_string()),
            other => VerigateError::Persistence(other.to_string()),
        })?;

        // Scan by email, not user id: any user mid-verification with this
        // address loses their pending slot.
        let mut cleared_users = Vec::new();
        {
            let mut pending = self.pending.lock().unwrap();
            pending.retain(|user_id, entry| {
                if entry.email == email {
                    cleared_users.push(user_id.clone());
                    false
                } else {
                    true
                }
            });
        }
        cleared_users.sort();

        self.events.on_event(VerifyEvent::VerificationReset {
            email: email.clone(),
            deleted_records: deleted,
            cleared_users: cleared_users.clone(),
        });

        Ok(ResetReport {
            email,
            deleted_records: deleted,
            cleared_users,
        })
    }

    /// Backend diagnostics for every record class
    pub fn storage_info(&self) -> StorageInfo {
        StorageInfo {
            domains: self.domains.describe(),
            codes: self.codes.info(),
        }
    }
}

fn storage_unavailable(err: StorageError) -> VerigateError {
    VerigateError::StorageUnavailable(err.to_string())
}

fn persistence(err: StorageError) -> VerigateError {
    VerigateError::Persistence(err.to_string())
}

/// Format a remaining wait as whole minutes and seconds
///
/// "4 minutes and 30 seconds", "1 minute", "45 seconds".
pub fn format_wait(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    let minutes = total / 60;
    let seconds = total % 60;

    let plural = |n: i64| if n == 1 { "" } else { "s" };
    if minutes > 0 && seconds > 0 {
        format!(
            "{minutes} minute{} and {seconds} second{}",
            plural(minutes),
            plural(seconds)
        )
    } else if minutes > 0 {
        format!("{minutes} minute{}", plural(minutes))
    } else {
        format!("{seconds} second{}", plural(seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::domain::entities::AllowedDomains;
    use crate::domain::ports::{
        BackendDescriptor, BackendKind, StorageDescriptor, StorageResult,
    };

    struct MemoryDomains {
        set: Mutex<AllowedDomains>,
        fail_load: AtomicBool,
        saved: AtomicBool,
    }

    impl MemoryDomains {
        fn with(domains: &[&str]) -> Self {
            let mut set = AllowedDomains::new();
            for d in domains {
                set.add(d).unwrap();
            }
            Self {
                set: Mutex::new(set),
                fail_load: AtomicBool::new(false),
                saved: AtomicBool::new(false),
            }
        }
    }

    impl DomainRepository for MemoryDomains {
        fn load(&self) -> StorageResult<AllowedDomains> {
            if self.fail_load.load(Ordering::SeqCst) {
                return Err(StorageError::Unavailable("backend down".to_string()));
            }
            Ok(self.set.lock().unwrap().clone())
        }

        fn save(&self, domains: &AllowedDomains) -> StorageResult<()> {
            *self.set.lock().unwrap() = domains.clone();
            self.saved.store(true, Ordering::SeqCst);
            Ok(())
        }

        fn describe(&self) -> BackendDescriptor {
            BackendDescriptor {
                kind: BackendKind::Local,
                location: "memory".to_string(),
            }
        }
    }

    #[derive(Default)]
    struct MemoryCodes {
        used: Mutex<Vec<UsedCodeRecord>>,
        audit: Mutex<HashMap<String, PendingVerification>>,
        fail_save_pending: AtomicBool,
        fail_move: AtomicBool,
    }

    impl CodeStore for MemoryCodes {
        fn save_pending(&self, user_id: &str, entry: &PendingVerification) -> StorageResult<()> {
            if self.fail_save_pending.load(Ordering::SeqCst) {
                return Err(StorageError::WriteFailed("audit down".to_string()));
            }
            self.audit
                .lock()
                .unwrap()
                .insert(user_id.to_string(), entry.clone());
            Ok(())
        }

        fn move_to_used(&self, record: &UsedCodeRecord) -> StorageResult<()> {
            if self.fail_move.load(Ordering::SeqCst) {
                return Err(StorageError::WriteFailed("bucket down".to_string()));
            }
            self.used.lock().unwrap().push(record.clone());
            self.audit.lock().unwrap().remove(&record.user_id);
            Ok(())
        }

        fn count_for_email(&self, email: &EmailAddress) -> StorageResult<u32> {
            Ok(self
                .used
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.email == *email)
                .count() as u32)
        }

        fn reset(&self, email: &EmailAddress) -> StorageResult<u32> {
            let mut used = self.used.lock().unwrap();
            let before = used.len();
            used.retain(|r| r.email != *email);
            let deleted = (before - used.len()) as u32;
            if deleted == 0 {
                return Err(StorageError::NotFound(email.to_string()));
            }
            Ok(deleted)
        }

        fn info(&self) -> StorageDescriptor {
            StorageDescriptor {
                pending: self.describe(),
                used: self.describe(),
            }
        }
    }

    impl MemoryCodes {
        fn describe(&self) -> BackendDescriptor {
            BackendDescriptor {
                kind: BackendKind::Local,
                location: "memory".to_string(),
            }
        }
    }

    struct TestMailer {
        succeed: AtomicBool,
        sent: Mutex<Vec<(String, String)>>,
    }

    impl TestMailer {
        fn new() -> Self {
            Self {
                succeed: AtomicBool::new(true),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn last_code(&self) -> String {
            self.sent.lock().unwrap().last().unwrap().1.clone()
        }
    }

    impl Mailer for TestMailer {
        fn send(&self, email: &EmailAddress, code: &VerificationCode) -> bool {
            if !self.succeed.load(Ordering::SeqCst) {
                return false;
            }
            self.sent
                .lock()
                .unwrap()
                .push((email.to_string(), code.to_string()));
            true
        }
    }

    struct RecordingSink(Mutex<Vec<VerifyEvent>>);

    impl VerifyEventSink for RecordingSink {
        fn on_event(&self, event: VerifyEvent) {
            self.0.lock().unwrap().push(event);
        }
    }

    type TestEngine = VerificationEngine<Arc<MemoryDomains>, Arc<MemoryCodes>, Arc<TestMailer>>;

    struct Harness {
        engine: TestEngine,
        domains: Arc<MemoryDomains>,
        codes: Arc<MemoryCodes>,
        mailer: Arc<TestMailer>,
        events: Arc<RecordingSink>,
    }

    fn harness() -> Harness {
        let domains = Arc::new(MemoryDomains::with(&["school.edu"]));
        let codes = Arc::new(MemoryCodes::default());
        let mailer = Arc::new(TestMailer::new());
        let events = Arc::new(RecordingSink(Mutex::new(Vec::new())));
        let engine = VerificationEngine::new(
            domains.clone(),
            codes.clone(),
            mailer.clone(),
            events.clone(),
            EngineSettings::default(),
        );
        Harness {
            engine,
            domains,
            codes,
            mailer,
            events,
        }
    }

    fn pending_len(engine: &TestEngine) -> usize {
        engine.pending.lock().unwrap().len()
    }

    #[test]
    fn already_verified_caller_is_a_noop() {
        let h = harness();
        let outcome = h
            .engine
            .start_verification("u1", "a@school.edu", true)
            .unwrap();
        assert_eq!(outcome, StartOutcome::AlreadyVerified);
        assert_eq!(pending_len(&h.engine), 0);
    }

    #[test]
    fn empty_email_is_invalid_input() {
        let h = harness();
        assert!(matches!(
            h.engine.start_verification("u1", "   ", false),
            Err(VerigateError::InvalidInput(_))
        ));
    }

    #[test]
    fn disallowed_domain_enumerates_the_allow_list() {
        let h = harness();
        let err = h
            .engine
            .start_verification("u1", "a@other.edu", false)
            .unwrap_err();
        match err {
            VerigateError::DomainNotAllowed { allowed } => {
                assert_eq!(allowed, vec!["school.edu".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unreadable_allow_list_fails_closed() {
        let h = harness();
        h.domains.fail_load.store(true, Ordering::SeqCst);
        assert!(matches!(
            h.engine.start_verification("u1", "a@school.edu", false),
            Err(VerigateError::StorageUnavailable(_))
        ));
    }

    #[test]
    fn capped_email_cannot_start_verification() {
        let h = harness();
        for user in ["u1", "u2"] {
            h.engine.start_verification(user, "a@school.edu", false).unwrap();
            let code = h.mailer.last_code();
            h.engine.submit_code(user, &code).unwrap();
        }
        assert!(matches!(
            h.engine.start_verification("u3", "a@school.edu", false),
            Err(VerigateError::VerificationCapReached { max: 2 })
        ));
    }

    #[test]
    fn second_request_inside_throttle_window_is_throttled() {
        let h = harness();
        let now = Utc::now();
        h.engine
            .start_verification_at("u1", "a@school.edu", false, now)
            .unwrap();

        let err = h
            .engine
            .start_verification_at("u1", "a@school.edu", false, now + Duration::minutes(1))
            .unwrap_err();
        match err {
            VerigateError::Throttled { wait } => assert_eq!(wait, "4 minutes"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn request_after_throttle_window_overwrites_the_code() {
        let h = harness();
        let now = Utc::now();
        h.engine
            .start_verification_at("u1", "a@school.edu", false, now)
            .unwrap();
        let old_code = h.mailer.last_code();

        h.engine
            .start_verification_at("u1", "a@school.edu", false, now + Duration::minutes(6))
            .unwrap();
        assert_eq!(pending_len(&h.engine), 1);

        // The superseded code no longer matches.
        let err = h.engine.submit_code("u1", &old_code).unwrap_err();
        assert!(matches!(err, VerigateError::CodeMismatch { .. }));
    }

    #[test]
    fn delivery_failure_rolls_back_the_pending_entry() {
        let h = harness();
        h.mailer.succeed.store(false, Ordering::SeqCst);
        assert!(matches!(
            h.engine.start_verification("u1", "a@school.edu", false),
            Err(VerigateError::DeliveryFailed)
        ));
        assert_eq!(pending_len(&h.engine), 0);

        // An immediate retry is possible, no throttle applies.
        h.mailer.succeed.store(true, Ordering::SeqCst);
        h.engine.start_verification("u1", "a@school.edu", false).unwrap();
    }

    #[test]
    fn audit_write_failure_does_not_block_issuance() {
        let h = harness();
        h.codes.fail_save_pending.store(true, Ordering::SeqCst);

        let outcome = h
            .engine
            .start_verification("u1", "a@school.edu", false)
            .unwrap();
        assert!(matches!(outcome, StartOutcome::CodeSent { .. }));

        let events = h.events.0.lock().unwrap();
        assert!(events
            .iter()
            .any(|e| matches!(e, VerifyEvent::PendingAuditWriteFailed { .. })));
    }

    #[test]
    fn submit_without_pending_request_fails() {
        let h = harness();
        assert!(matches!(
            h.engine.submit_code("u1", "AB12CD34"),
            Err(VerigateError::NoPendingRequest)
        ));
    }

    #[test]
    fn expired_code_is_cleared() {
        let h = harness();
        let now = Utc::now();
        h.engine
            .start_verification_at("u1", "a@school.edu", false, now)
            .unwrap();
        let code = h.mailer.last_code();

        let err = h
            .engine
            .submit_code_at("u1", &code, now + Duration::minutes(31))
            .unwrap_err();
        assert!(matches!(err, VerigateError::CodeExpired));
        assert!(matches!(
            h.engine.submit_code("u1", &code),
            Err(VerigateError::NoPendingRequest)
        ));
    }

    #[test]
    fn mismatches_count_down_then_exhaust() {
        let h = harness();
        h.engine.start_verification("u1", "a@school.edu", false).unwrap();
        let code = h.mailer.last_code();

        for expected_left in [2, 1, 0] {
            let err = h.engine.submit_code("u1", "WRONG123").unwrap_err();
            match err {
                VerigateError::CodeMismatch { attempts_left } => {
                    assert_eq!(attempts_left, expected_left);
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        // Fourth submission exceeds the limit even with the right code.
        assert!(matches!(
            h.engine.submit_code("u1", &code),
            Err(VerigateError::TooManyAttempts)
        ));
        assert!(matches!(
            h.engine.submit_code("u1", &code),
            Err(VerigateError::NoPendingRequest)
        ));
    }

    #[test]
    fn matching_code_is_case_insensitive_and_single_use() {
        let h = harness();
        h.engine.start_verification("u1", "a@school.edu", false).unwrap();
        let code = h.mailer.last_code().to_lowercase();

        let success = h.engine.submit_code("u1", &code).unwrap();
        assert_eq!(success.email.as_str(), "a@school.edu");
        assert_eq!(
            h.engine.check_email("a@school.edu").unwrap().count,
            1
        );

        // The code was consumed with the pending entry.
        assert!(matches!(
            h.engine.submit_code("u1", &code),
            Err(VerigateError::NoPendingRequest)
        ));
    }

    #[test]
    fn persistence_failure_keeps_the_pending_entry() {
        let h = harness();
        h.engine.start_verification("u1", "a@school.edu", false).unwrap();
        let code = h.mailer.last_code();

        h.codes.fail_move.store(true, Ordering::SeqCst);
        assert!(matches!(
            h.engine.submit_code("u1", &code),
            Err(VerigateError::Persistence(_))
        ));
        assert_eq!(pending_len(&h.engine), 1);

        // Once the backend recovers the same code still redeems.
        h.codes.fail_move.store(false, Ordering::SeqCst);
        h.engine.submit_code("u1", &code).unwrap();
        assert_eq!(h.engine.check_email("a@school.edu").unwrap().count, 1);
    }

    #[test]
    fn verified_event_fires_after_commit() {
        let h = harness();
        h.engine.start_verification("u1", "a@school.edu", false).unwrap();
        let code = h.mailer.last_code();
        h.engine.submit_code("u1", &code).unwrap();

        let events = h.events.0.lock().unwrap();
        assert!(events.iter().any(|e| matches!(
            e,
            VerifyEvent::Verified { user_id, .. } if user_id == "u1"
        )));
    }

    #[test]
    fn at_most_one_pending_entry_per_user() {
        let h = harness();
        let now = Utc::now();
        h.engine
            .start_verification_at("u1", "a@school.edu", false, now)
            .unwrap();
        h.engine
            .start_verification_at("u1", "b@school.edu", false, now + Duration::minutes(6))
            .unwrap();
        h.engine
            .start_verification_at("u2", "c@school.edu", false, now)
            .unwrap();
        assert_eq!(pending_len(&h.engine), 2);
    }

    #[test]
    fn reset_clears_records_and_matching_pending_entries() {
        let h = harness();
        h.engine.start_verification("u1", "a@school.edu", false).unwrap();
        let code = h.mailer.last_code();
        h.engine.submit_code("u1", &code).unwrap();

        // u2 is mid-verification with the same email, u3 with another.
        h.engine.start_verification("u2", "a@school.edu", false).unwrap();
        h.engine.start_verification("u3", "b@school.edu", false).unwrap();

        let report = h.engine.reset_email("a@school.edu").unwrap();
        assert_eq!(report.deleted_records, 1);
        assert_eq!(report.cleared_users, vec!["u2".to_string()]);
        assert_eq!(h.engine.check_email("a@school.edu").unwrap().count, 0);
        assert_eq!(pending_len(&h.engine), 1);
    }

    #[test]
    fn reset_unknown_email_is_not_found() {
        let h = harness();
        assert!(matches!(
            h.engine.reset_email("ghost@school.edu"),
            Err(VerigateError::NotFound(_))
        ));
    }

    #[test]
    fn check_email_is_a_pure_read() {
        let h = harness();
        let report = h.engine.check_email("a@school.edu").unwrap();
        assert_eq!(report.count, 0);
        assert_eq!(report.max_allowed, 2);
        assert!(report.domain_allowed);
        assert!(!report.cap_reached());
        assert_eq!(pending_len(&h.engine), 0);

        let report = h.engine.check_email("a@other.edu").unwrap();
        assert!(!report.domain_allowed);
    }

    #[test]
    fn remove_last_domain_is_rejected_without_saving() {
        let h = harness();
        assert!(matches!(
            h.engine.remove_domain("school.edu"),
            Err(VerigateError::LastDomain)
        ));
        assert!(!h.domains.saved.load(Ordering::SeqCst));
        assert_eq!(h.engine.list_domains().unwrap(), vec!["school.edu"]);
    }

    #[test]
    fn duplicate_domain_add_skips_the_save() {
        let h = harness();
        assert_eq!(
            h.engine.add_domain("school.edu").unwrap(),
            DomainAddOutcome::AlreadyListed
        );
        assert!(!h.domains.saved.load(Ordering::SeqCst));

        assert_eq!(
            h.engine.add_domain("college.edu").unwrap(),
            DomainAddOutcome::Added
        );
        assert!(h.domains.saved.load(Ordering::SeqCst));
    }

    #[test]
    fn scenario_two_uses_up_to_the_cap() {
        // allow-list {school.edu}, cap 2: verify, mismatch once, redeem,
        // then a second run for the same email still succeeds.
        let h = harness();

        h.engine.start_verification("u1", "a@school.edu", false).unwrap();
        let code = h.mailer.last_code();

        let err = h.engine.submit_code("u1", "WRONG123").unwrap_err();
        assert!(matches!(err, VerigateError::CodeMismatch { attempts_left: 2 }));

        h.engine.submit_code("u1", &code).unwrap();
        assert_eq!(h.engine.check_email("a@school.edu").unwrap().count, 1);

        let outcome = h
            .engine
            .start_verification("u1", "a@school.edu", false)
            .unwrap();
        assert!(matches!(outcome, StartOutcome::CodeSent { .. }));
    }

    #[test]
    fn format_wait_minutes_and_seconds() {
        assert_eq!(
            format_wait(Duration::seconds(270)),
            "4 minutes and 30 seconds"
        );
    }

    #[test]
    fn format_wait_whole_minute() {
        assert_eq!(format_wait(Duration::seconds(60)), "1 minute");
    }

    #[test]
    fn format_wait_seconds_only() {
        assert_eq!(format_wait(Duration::seconds(45)), "45 seconds");
        assert_eq!(format_wait(Duration::seconds(1)), "1 second");
    }

    #[test]
    fn format_wait_clamps_negative_to_zero() {
        assert_eq!(format_wait(Duration::seconds(-5)), "0 seconds");
    }

    #[test]
    fn default_settings_match_documented_limits() {
        let settings = EngineSettings::default();
        assert_eq!(settings.max_verifications_per_email, 2);
        assert_eq!(settings.throttle, Duration::minutes(5));
        assert_eq!(settings.expiry, Duration::minutes(30));
    }
}
