//! Application layer: the verification engine use case and its outcomes

pub mod engine;
pub mod outcome;

pub use engine::{format_wait, EngineSettings, VerificationEngine};
pub use outcome::{
    DomainAddOutcome, EmailReport, ResetReport, StartOutcome, StorageInfo, VerifiedSuccess,
};
