//! Configuration types and loading

pub mod loader;
pub mod types;

pub use loader::{load, load_or_default};
pub use types::{Config, LimitsConfig, MailConfig, MailSink, StorageConfig};
