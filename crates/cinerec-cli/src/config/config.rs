//! `AppConfig` struct and TOML read/write.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default backend base URL.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Default marquee scroll interval in milliseconds.
const DEFAULT_MARQUEE_TICK_MS: u64 = 150;

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Recommendation backend settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Terminal UI settings.
    #[serde(default)]
    pub ui: UiConfig,
}

/// Recommendation backend configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL of the backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    String::from(DEFAULT_BASE_URL)
}

/// Terminal UI configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiConfig {
    /// Milliseconds between marquee scroll steps.
    #[serde(default = "default_marquee_tick_ms")]
    pub marquee_tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            marquee_tick_ms: DEFAULT_MARQUEE_TICK_MS,
        }
    }
}

const fn default_marquee_tick_ms() -> u64 {
    DEFAULT_MARQUEE_TICK_MS
}

impl UiConfig {
    /// Marquee scroll interval.
    #[must_use]
    pub const fn marquee_tick(&self) -> Duration {
        Duration::from_millis(self.marquee_tick_ms)
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = self.to_toml()?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Serializes the config as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize config to TOML")
    }
}
