//! Domain value objects

pub mod code;
pub mod email;

pub use code::{VerificationCode, CODE_LEN};
pub use email::EmailAddress;
