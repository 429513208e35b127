//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod code_store;
pub mod domain_repository;
pub mod mailer;
pub mod storage_error;
pub mod verify_events;

pub use code_store::{BackendDescriptor, BackendKind, CodeStore, StorageDescriptor};
pub use domain_repository::DomainRepository;
pub use mailer::Mailer;
pub use storage_error::{StorageError, StorageResult};
pub use verify_events::{NoopEventSink, VerifyEvent, VerifyEventSink};
