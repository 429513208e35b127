//! Configuration type definitions

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::application::EngineSettings;
use crate::domain::ports::BackendKind;

/// Top-level configuration, loaded from `verigate.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub limits: LimitsConfig,

    #[serde(default)]
    pub mail: MailConfig,
}

/// Storage backend selection, resolved once at construction.
///
/// `backend` is the master switch; each record class can override it, which
/// mirrors deployments that keep domains on disk but ship used-code records
/// to a bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_backend")]
    pub backend: BackendKind,

    #[serde(default)]
    pub domains: Option<BackendKind>,

    #[serde(default)]
    pub pending: Option<BackendKind>,

    #[serde(default)]
    pub used: Option<BackendKind>,

    /// Root directory for local records
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Bucket for object-storage records
    #[serde(default)]
    pub bucket: String,

    /// Separate bucket for used-code records; falls back to `bucket`
    #[serde(default)]
    pub used_bucket: Option<String>,

    /// Name of the object-storage CLI binary
    #[serde(default = "default_storage_cli")]
    pub storage_cli: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            domains: None,
            pending: None,
            used: None,
            data_dir: default_data_dir(),
            bucket: String::new(),
            used_bucket: None,
            storage_cli: default_storage_cli(),
        }
    }
}

impl StorageConfig {
    pub fn domains_backend(&self) -> BackendKind {
        self.domains.unwrap_or(self.backend)
    }

    pub fn pending_backend(&self) -> BackendKind {
        self.pending.unwrap_or(self.backend)
    }

    pub fn used_backend(&self) -> BackendKind {
        self.used.unwrap_or(self.backend)
    }

    pub fn used_bucket(&self) -> &str {
        self.used_bucket.as_deref().unwrap_or(&self.bucket)
    }
}

/// Verification limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_per_email")]
    pub max_verifications_per_email: u32,

    #[serde(default = "default_throttle_minutes")]
    pub throttle_minutes: u32,

    #[serde(default = "default_expiry_minutes")]
    pub expiry_minutes: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_verifications_per_email: default_max_per_email(),
            throttle_minutes: default_throttle_minutes(),
            expiry_minutes: default_expiry_minutes(),
        }
    }
}

impl LimitsConfig {
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            max_verifications_per_email: self.max_verifications_per_email,
            throttle: chrono::Duration::minutes(i64::from(self.throttle_minutes)),
            expiry: chrono::Duration::minutes(i64::from(self.expiry_minutes)),
        }
    }
}

/// Email delivery sink selection
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MailConfig {
    #[serde(default)]
    pub sink: MailSink,

    /// Delivery command for the `script` sink; receives the payload on stdin
    #[serde(default)]
    pub command: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MailSink {
    #[default]
    Console,
    Script,
}

fn default_backend() -> BackendKind {
    BackendKind::Local
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".verigate"))
        .unwrap_or_else(|| PathBuf::from(".verigate"))
}

fn default_storage_cli() -> String {
    "aws".to_string()
}

fn default_max_per_email() -> u32 {
    2
}

fn default_throttle_minutes() -> u32 {
    5
}

fn default_expiry_minutes() -> u32 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_limits() {
        let config = Config::default();
        assert_eq!(config.limits.max_verifications_per_email, 2);
        assert_eq!(config.limits.throttle_minutes, 5);
        assert_eq!(config.limits.expiry_minutes, 30);
        assert_eq!(config.storage.backend, BackendKind::Local);
        assert_eq!(config.mail.sink, MailSink::Console);
    }

    #[test]
    fn per_class_backend_falls_back_to_master_switch() {
        let mut storage = StorageConfig {
            backend: BackendKind::ObjectStorage,
            ..Default::default()
        };
        assert_eq!(storage.domains_backend(), BackendKind::ObjectStorage);

        storage.used = Some(BackendKind::Local);
        assert_eq!(storage.used_backend(), BackendKind::Local);
        assert_eq!(storage.pending_backend(), BackendKind::ObjectStorage);
    }

    #[test]
    fn used_bucket_falls_back_to_main_bucket() {
        let mut storage = StorageConfig {
            bucket: "codes".to_string(),
            ..Default::default()
        };
        assert_eq!(storage.used_bucket(), "codes");

        storage.used_bucket = Some("used-codes".to_string());
        assert_eq!(storage.used_bucket(), "used-codes");
    }

    #[test]
    fn parses_backend_names_from_toml() {
        let config: Config = toml::from_str(
            r#"
            [storage]
            backend = "object-storage"
            domains = "local"
            bucket = "codes"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.backend, BackendKind::ObjectStorage);
        assert_eq!(config.storage.domains_backend(), BackendKind::Local);
        assert_eq!(config.storage.pending_backend(), BackendKind::ObjectStorage);
    }
}
