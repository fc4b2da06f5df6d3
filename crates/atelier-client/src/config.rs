use config::{Config as ConfigLoader, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::error::Result;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client connection settings.
///
/// Loaded from an optional `atelier.toml` in the working directory with
/// `ATELIER_*` environment overrides, or built directly.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    /// Total timeout for unary requests. The chat stream is exempt and is
    /// read until the server closes it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load from `atelier.toml` (optional) and `ATELIER_*` env vars.
    pub fn load() -> Result<Self> {
        let settings = ConfigLoader::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
            .add_source(File::with_name("atelier").required(false))
            .add_source(Environment::with_prefix("ATELIER"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
