//! Application configuration.
//!
//! Values come from `<config_dir>/courtside/config.toml`, overridden by
//! `COURTSIDE_*` environment variables. The service base URL has no
//! default and must be supplied by one of them.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::booking::DEFAULT_WINDOW_DAYS;

/// Directory under the user's config dir.
pub const CONFIG_DIR: &str = "courtside";
/// File name of the configuration.
pub const CONFIG_FILE: &str = "config.toml";
/// Prefix of environment overrides, e.g. `COURTSIDE_API_BASE_URL`.
pub const ENV_PREFIX: &str = "COURTSIDE";

const DEFAULT_CONFIG: &str = r#"# Courtside configuration.
#
# Base URL of the tennis reservation service. Required; may also be set
# through the COURTSIDE_API_BASE_URL environment variable.
# api_base_url = "http://localhost:3500"

# Seconds before a request to the service is abandoned.
request_timeout_secs = 30

# Days after today that can still be booked.
booking_window_days = 2
"#;

/// Settings shared by the gateway and the front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root of the reservation service, without trailing slash.
    pub api_base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Length of the booking window in days after today.
    #[serde(default = "default_window_days")]
    pub booking_window_days: u32,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_window_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}

impl AppConfig {
    /// Load from the default location plus environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load from `path` (which may be missing) plus environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        load_with_prefix(path.as_ref(), ENV_PREFIX)
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn load_with_prefix(path: &Path, prefix: &str) -> Result<AppConfig> {
    let settings = Config::builder()
        .add_source(
            File::from(path.to_path_buf())
                .format(FileFormat::Toml)
                .required(false),
        )
        .add_source(Environment::with_prefix(prefix).try_parsing(true))
        .build()
        .with_context(|| format!("failed to read configuration {}", path.display()))?;

    let mut config: AppConfig = settings.try_deserialize().with_context(|| {
        format!(
            "invalid configuration; api_base_url must be set in {} or {}_API_BASE_URL",
            path.display(),
            prefix
        )
    })?;

    config.api_base_url = config.api_base_url.trim().trim_end_matches('/').to_string();
    if config.api_base_url.is_empty() {
        bail!("api_base_url is empty in {}", path.display());
    }
    Ok(config)
}

/// Default configuration file location.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write the commented template to the default location when missing.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = config_path();
    ensure_default_config_at(&path)?;
    Ok(path)
}

/// Write the commented template to `path` when missing.
pub fn ensure_default_config_at(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config {}", path.display()))
}
