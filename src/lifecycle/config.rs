//! # Configuration
//!
//! Where the console's backend lives and how its in-process channels are sized.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `HOTEL_CONSOLE_BACKEND` | `memory`, or the REST base URL | `http://localhost:3000/api` |
//! | `HOTEL_CONSOLE_CHANNEL_CAPACITY` | ledger channel buffer | `32` |
//!
//! The same settings can be read from JSON:
//!
//! ```json
//! { "backend": { "kind": "rest", "base_url": "http://ledger:3000/api" }, "channel_capacity": 64 }
//! ```

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const BACKEND_VAR: &str = "HOTEL_CONSOLE_BACKEND";
pub const CHANNEL_CAPACITY_VAR: &str = "HOTEL_CONSOLE_CHANNEL_CAPACITY";

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Value of [`BACKEND_VAR`] selecting the in-memory ledger.
const IN_MEMORY: &str = "memory";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid backend URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid channel capacity '{0}': expected a positive integer")]
    InvalidCapacity(String),

    #[error("Invalid configuration: {0}")]
    Json(String),
}

/// Which backend the console talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendConfig {
    /// A REST server, e.g. `http://localhost:3000/api`.
    Rest { base_url: String },
    /// An in-process ledger that starts empty.
    InMemory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub backend: BackendConfig,
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_channel_capacity() -> usize {
    DEFAULT_CHANNEL_CAPACITY
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::Rest {
                base_url: DEFAULT_BASE_URL.to_string(),
            },
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl ConsoleConfig {
    pub fn in_memory() -> Self {
        Self {
            backend: BackendConfig::InMemory,
            ..Self::default()
        }
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(backend) = lookup(BACKEND_VAR) {
            let backend = backend.trim();
            config.backend = if backend.eq_ignore_ascii_case(IN_MEMORY) {
                BackendConfig::InMemory
            } else {
                BackendConfig::Rest {
                    base_url: backend.to_string(),
                }
            };
        }
        if let Some(capacity) = lookup(CHANNEL_CAPACITY_VAR) {
            config.channel_capacity = capacity
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidCapacity(capacity.clone()))?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_capacity == 0 {
            return Err(ConfigError::InvalidCapacity("0".to_string()));
        }
        if let BackendConfig::Rest { base_url } = &self.backend {
            parse_base_url(base_url)?;
        }
        Ok(())
    }
}

/// Parses a REST base URL. Only `http` and `https` URLs that can carry path segments
/// are accepted.
pub fn parse_base_url(base_url: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };
    let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("cannot be a base URL".to_string()));
    }
    Ok(url)
}
