//! DomainRepository port
//!
//! Persists the allow-listed domain set as a whole-set overwrite. The write
//! either succeeds entirely or the prior set remains authoritative.

use std::sync::Arc;

use crate::domain::entities::AllowedDomains;
use crate::domain::ports::code_store::BackendDescriptor;
use crate::domain::ports::storage_error::StorageResult;

pub trait DomainRepository: Send + Sync {
    /// Load the current set. A missing record yields an empty set; a backend
    /// failure is an error so callers can fail closed.
    fn load(&self) -> StorageResult<AllowedDomains>;

    /// Overwrite the persisted set atomically
    fn save(&self, domains: &AllowedDomains) -> StorageResult<()>;

    /// Backend kind and location, diagnostics only
    fn describe(&self) -> BackendDescriptor;
}

impl<T: DomainRepository> DomainRepository for Arc<T> {
    fn load(&self) -> StorageResult<AllowedDomains> {
        self.as_ref().load()
    }

    fn save(&self, domains: &AllowedDomains) -> StorageResult<()> {
        self.as_ref().save(domains)
    }

    fn describe(&self) -> BackendDescriptor {
        self.as_ref().describe()
    }
}
