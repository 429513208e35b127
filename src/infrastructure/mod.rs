//! Infrastructure layer: concrete port implementations

pub mod events;
pub mod mailer;
pub mod storage;

pub use events::ConsoleEventSink;
pub use mailer::{ConsoleMailer, ScriptMailer};
pub use storage::{
    build_code_store, build_domain_repository, LocalRecordStore, ObjectCli, ObjectRecordStore,
    RecordCodeStore, RecordStore, StoredDomainRepository,
};
