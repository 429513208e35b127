//! Configuration loading
//!
//! Search order: explicit path, `verigate.toml` in the working directory,
//! then the user config directory, then built-in defaults. A small set of
//! environment overrides layers on top for containerized deployments.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::ports::BackendKind;
use crate::error::{VerigateError, VerigateResult};

use super::types::Config;

/// Load configuration from a specific file
pub fn load(path: &Path) -> VerigateResult<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        VerigateError::StorageUnavailable(format!("cannot read {}: {e}", path.display()))
    })?;
    let config: Config = toml::from_str(&content).map_err(|e| {
        VerigateError::InvalidInput(format!("invalid config {}: {e}", path.display()))
    })?;
    Ok(with_env_overrides(config))
}

/// Load from the working directory, user config, or defaults
pub fn load_or_default(cwd: Option<&Path>) -> Config {
    if let Some(dir) = cwd {
        let project = dir.join("verigate.toml");
        if project.exists() {
            if let Ok(config) = load(&project) {
                return config;
            }
        }
    }

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            if let Ok(config) = load(&user_config) {
                return config;
            }
        }
    }

    with_env_overrides(Config::default())
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("verigate/config.toml"))
}

fn with_env_overrides(mut config: Config) -> Config {
    if let Ok(dir) = std::env::var("VERIGATE_DATA_DIR") {
        if !dir.is_empty() {
            config.storage.data_dir = PathBuf::from(dir);
        }
    }
    if let Ok(backend) = std::env::var("VERIGATE_BACKEND") {
        match backend.as_str() {
            "local" => config.storage.backend = BackendKind::Local,
            "object-storage" => config.storage.backend = BackendKind::ObjectStorage,
            _ => {}
        }
    }
    if let Ok(bucket) = std::env::var("VERIGATE_BUCKET") {
        if !bucket.is_empty() {
            config.storage.bucket = bucket;
        }
    }
    config
}
