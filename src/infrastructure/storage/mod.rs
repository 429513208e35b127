//! Storage backends
//!
//! `RecordStore` is the narrow blob interface both backends implement:
//! local JSON files under a data directory, or objects in a bucket driven
//! through the object-storage CLI. The repositories in `domains.rs` and
//! `codes.rs` sit on top and speak the domain ports. Backend selection
//! happens exactly once, in `build_domain_repository`/`build_code_store`.

pub mod codes;
pub mod domains;
pub mod local;
pub mod object;

use crate::config::StorageConfig;
use crate::domain::ports::{BackendDescriptor, BackendKind, StorageResult};

pub use codes::RecordCodeStore;
pub use domains::StoredDomainRepository;
pub use local::LocalRecordStore;
pub use object::{ObjectCli, ObjectRecordStore};

/// Keyed blob storage for one record class
///
/// Implementations:
/// - `LocalRecordStore` - JSON files under a directory
/// - `ObjectRecordStore` - objects under a bucket prefix
pub trait RecordStore: Send + Sync {
    /// Fetch a record body; `None` when the key does not exist
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a record body atomically (whole-record overwrite)
    fn put(&self, key: &str, body: &str) -> StorageResult<()>;

    /// Keys starting with `prefix`
    fn list(&self, prefix: &str) -> StorageResult<Vec<String>>;

    /// Delete a record; missing keys are a no-op
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// Backend kind and location, diagnostics only
    fn describe(&self) -> BackendDescriptor;
}

fn record_store_for(
    kind: BackendKind,
    config: &StorageConfig,
    class_dir: &str,
    bucket: &str,
) -> Box<dyn RecordStore> {
    match kind {
        BackendKind::Local => Box::new(LocalRecordStore::new(config.data_dir.join(class_dir))),
        BackendKind::ObjectStorage => Box::new(ObjectRecordStore::new(
            ObjectCli::new(&config.storage_cli),
            bucket,
            format!("{class_dir}/"),
        )),
    }
}

/// Build the domain repository the configuration names
pub fn build_domain_repository(config: &StorageConfig) -> StoredDomainRepository {
    let store = match config.domains_backend() {
        BackendKind::Local => {
            Box::new(LocalRecordStore::new(config.data_dir.clone())) as Box<dyn RecordStore>
        }
        BackendKind::ObjectStorage => Box::new(ObjectRecordStore::new(
            ObjectCli::new(&config.storage_cli),
            &config.bucket,
            String::new(),
        )),
    };
    StoredDomainRepository::new(store)
}

/// Build the code store the configuration names
pub fn build_code_store(config: &StorageConfig) -> RecordCodeStore {
    let pending = record_store_for(
        config.pending_backend(),
        config,
        "pending_codes",
        &config.bucket,
    );
    let used = record_store_for(
        config.used_backend(),
        config,
        "used_codes",
        config.used_bucket(),
    );
    RecordCodeStore::new(pending, used)
}
