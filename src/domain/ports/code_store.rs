//! CodeStore port
//!
//! Persists the audit copy of pending codes (keyed by user) and the
//! append-only used-code records (keyed by email). Backends: local disk or
//! object storage, selected once at construction and never mixed within a
//! record class.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{PendingVerification, UsedCodeRecord};
use crate::domain::ports::storage_error::StorageResult;
use crate::domain::value_objects::EmailAddress;

/// Which backend holds a record class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    Local,
    ObjectStorage,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Local => f.write_str("local"),
            BackendKind::ObjectStorage => f.write_str("object-storage"),
        }
    }
}

/// Backend kind plus its location identifier (directory path or bucket/prefix)
#[derive(Debug, Clone, Serialize)]
pub struct BackendDescriptor {
    pub kind: BackendKind,
    pub location: String,
}

/// Per-record-class backend report for the `storage-info` surface
#[derive(Debug, Clone, Serialize)]
pub struct StorageDescriptor {
    pub pending: BackendDescriptor,
    pub used: BackendDescriptor,
}

pub trait CodeStore: Send + Sync {
    /// Write the audit copy of a pending verification.
    ///
    /// The authoritative pending state lives in the engine's memory; failure
    /// here must not block issuing the code, only be reported.
    fn save_pending(&self, user_id: &str, entry: &PendingVerification) -> StorageResult<()>;

    /// Durably append a used-code record and drop the pending audit copy.
    ///
    /// Must be read-after-write consistent with `count_for_email`.
    fn move_to_used(&self, record: &UsedCodeRecord) -> StorageResult<()>;

    /// Number of used-code records for the email
    fn count_for_email(&self, email: &EmailAddress) -> StorageResult<u32>;

    /// Delete all used-code records and any pending audit copies for the
    /// email. Returns the number of records removed; `NotFound` when nothing
    /// exists.
    fn reset(&self, email: &EmailAddress) -> StorageResult<u32>;

    /// Active backend per record class, diagnostics only
    fn info(&self) -> StorageDescriptor;
}

impl<T: CodeStore> CodeStore for std::sync::Arc<T> {
    fn save_pending(&self, user_id: &str, entry: &PendingVerification) -> StorageResult<()> {
        self.as_ref().save_pending(user_id, entry)
    }

    fn move_to_used(&self, record: &UsedCodeRecord) -> StorageResult<()> {
        self.as_ref().move_to_used(record)
    }

    fn count_for_email(&self, email: &EmailAddress) -> StorageResult<u32> {
        self.as_ref().count_for_email(email)
    }

    fn reset(&self, email: &EmailAddress) -> StorageResult<u32> {
        self.as_ref().reset(email)
    }

    fn info(&self) -> StorageDescriptor {
        self.as_ref().info()
    }
}
