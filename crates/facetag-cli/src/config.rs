use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Runtime settings shared by all subcommands.
///
/// Layered as: defaults, optional TOML file, `FACETAG_*` environment
/// variables, then command-line flags (applied by the caller).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base URL of the facebox service.
    pub facebox_url: String,
    /// Per-request timeout for service calls.
    pub request_timeout_secs: u64,
    /// Pause after each training image.
    pub train_delay_ms: u64,
    /// JPEG quality for tagged output (1-100).
    pub jpeg_quality: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            facebox_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 60,
            train_delay_ms: facetag_core::DEFAULT_TRAIN_DELAY.as_millis() as u64,
            jpeg_quality: facetag_core::DEFAULT_JPEG_QUALITY,
        }
    }
}

impl Config {
    /// Load from an optional TOML file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Override fields from `FACETAG_*` variables. Unparseable values are ignored.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("FACETAG_FACEBOX_URL") {
            self.facebox_url = url;
        }
        self.request_timeout_secs =
            env_parse(&lookup, "FACETAG_REQUEST_TIMEOUT_SECS", self.request_timeout_secs);
        self.train_delay_ms = env_parse(&lookup, "FACETAG_TRAIN_DELAY_MS", self.train_delay_ms);
        self.jpeg_quality = env_parse(&lookup, "FACETAG_JPEG_QUALITY", self.jpeg_quality);
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn train_delay(&self) -> Duration {
        Duration::from_millis(self.train_delay_ms)
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100)
    }
}

fn env_parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, current: T) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(current)
}
