//! Domain entities

pub mod allowed_domains;
pub mod pending;

pub use allowed_domains::{AddOutcome, AllowedDomains};
pub use pending::{PendingVerification, UsedCodeRecord, MAX_ATTEMPTS};
