//! TOML configuration stored at `<flow dir>/config.toml`.
//!
//! Every key is optional; a missing file means defaults.

use crate::persistence::read_file;
use crate::ticker::DEFAULT_POLL_MS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Duration shown while the queue is empty, and of the seed task
    #[serde(default = "default_idle_minutes")]
    pub idle_minutes: u32,
    /// Label of the seed task
    #[serde(default = "default_seed_label")]
    pub seed_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_poll_ms")]
    pub poll_ms: u64,
    #[serde(default = "default_true")]
    pub notifications: bool,
    #[serde(default = "default_true")]
    pub use_emoji: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

fn default_idle_minutes() -> u32 {
    45
}
fn default_seed_label() -> String {
    "Enter Task".to_string()
}
fn default_poll_ms() -> u64 {
    DEFAULT_POLL_MS
}
fn default_true() -> bool {
    true
}
fn default_log_filter() -> String {
    "flow=info".to_string()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            idle_minutes: default_idle_minutes(),
            seed_label: default_seed_label(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            poll_ms: default_poll_ms(),
            notifications: true,
            use_emoji: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl TimerConfig {
    /// Idle default in seconds, never 0
    pub fn idle_secs(&self) -> u32 {
        self.idle_minutes.max(1).saturating_mul(60)
    }
}

impl Config {
    /// Load from `path`; a missing or empty file yields defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = read_file(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Load, falling back to defaults on a malformed file. The error is
    /// returned alongside so the caller can log it once logging is up.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> (Self, Option<anyhow::Error>) {
        match Self::load(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}
