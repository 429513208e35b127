//! Outcome types returned by the verification engine
//!
//! Successful results only; failures travel through `VerigateError`.

use serde::Serialize;

use crate::domain::entities::AddOutcome;
use crate::domain::ports::{BackendDescriptor, BackendKind, StorageDescriptor};
use crate::domain::value_objects::EmailAddress;

/// Result of `start_verification`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// Caller is already fully verified; nothing was done
    AlreadyVerified,
    /// A code was generated and handed to the delivery sink
    CodeSent { email: EmailAddress },
}

/// Result of a successful `submit_code`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedSuccess {
    /// The email that was proven; the caller grants access based on this
    pub email: EmailAddress,
}

/// Result of `add_domain`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainAddOutcome {
    Added,
    AlreadyListed,
}

impl From<AddOutcome> for DomainAddOutcome {
    fn from(outcome: AddOutcome) -> Self {
        match outcome {
            AddOutcome::Added => DomainAddOutcome::Added,
            AddOutcome::AlreadyPresent => DomainAddOutcome::AlreadyListed,
        }
    }
}

/// Pure-read report for `check_email`
#[derive(Debug, Clone, Serialize)]
pub struct EmailReport {
    pub email: EmailAddress,
    pub count: u32,
    pub max_allowed: u32,
    pub backend: BackendKind,
    pub domain_allowed: bool,
}

impl EmailReport {
    pub fn cap_reached(&self) -> bool {
        self.count >= self.max_allowed
    }
}

/// Result of `reset_email`
#[derive(Debug, Clone, Serialize)]
pub struct ResetReport {
    pub email: EmailAddress,
    pub deleted_records: u32,
    /// In-memory pending entries cleared alongside the durable records
    pub cleared_users: Vec<String>,
}

/// Diagnostics report for `storage_info`
#[derive(Debug, Clone, Serialize)]
pub struct StorageInfo {
    pub domains: BackendDescriptor,
    pub codes: StorageDescriptor,
}
