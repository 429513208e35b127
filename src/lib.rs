//! Verigate - email-domain verification engine
//!
//! Grants access after proving ownership of an email address from an
//! approved domain set: single-use time-limited codes, per-user throttling,
//! per-email usage caps, and an allow-list of domains, persisted across
//! interchangeable local-disk and object-storage backends.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{
    format_wait, DomainAddOutcome, EmailReport, EngineSettings, ResetReport, StartOutcome,
    StorageInfo, VerificationEngine, VerifiedSuccess,
};
pub use config::Config;
pub use domain::entities::{AllowedDomains, PendingVerification, UsedCodeRecord, MAX_ATTEMPTS};
pub use domain::ports::{
    BackendDescriptor, BackendKind, CodeStore, DomainRepository, Mailer, NoopEventSink,
    StorageDescriptor, StorageError, VerifyEvent, VerifyEventSink,
};
pub use domain::value_objects::{EmailAddress, VerificationCode};
pub use error::{VerigateError, VerigateResult};
