//! Configuration.
//!
//! Defaults match the fixed constants of the card game (10 cards, 3 attempts
//! per slot, the cataas endpoint). `PawsConfig::load` layers `paws.toml` and
//! `PAWS_`-prefixed environment variables on top, e.g.
//! `PAWS_DECK__SIZE=5` or `PAWS_SOURCE__ENDPOINT=...`.

use std::path::Path;
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::loader::RetryPolicy;

pub const DEFAULT_CONFIG_PATH: &str = "paws.toml";
pub const ENV_PREFIX: &str = "PAWS_";

pub const NUM_CATS: usize = 10;
pub const MAX_RETRIES: u32 = 3;
pub const CAT_API_URL: &str = "https://cataas.com/cat?json=true&type=small";
pub const CAT_API_ORIGIN: &str = "https://cataas.com";
pub const FALLBACK_URL: &str = "https://cataas.com/cat/cute?type=small";
pub const FALLBACK_TAG: &str = "cute";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PawsConfig {
    pub source: SourceConfig,
    pub deck: DeckConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub endpoint: String,
    /// Prefixed to relative urls returned by the endpoint.
    pub base_origin: String,
    /// Unset means no per-request timeout.
    pub request_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub size: usize,
    pub max_attempts: u32,
    pub retry_base_delay_ms: u64,
    pub retry_multiplier: f64,
    pub fallback_url: String,
    pub fallback_tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence.
    pub filter: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: CAT_API_URL.to_string(),
            base_origin: CAT_API_ORIGIN.to_string(),
            request_timeout_ms: None,
        }
    }
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            size: NUM_CATS,
            max_attempts: MAX_RETRIES,
            retry_base_delay_ms: 0,
            retry_multiplier: 2.0,
            fallback_url: FALLBACK_URL.to_string(),
            fallback_tags: vec![FALLBACK_TAG.to_string()],
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl DeckConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
            multiplier: self.retry_multiplier,
        }
    }
}

impl PawsConfig {
    /// Defaults, then `./paws.toml`, then environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let figment = Figment::from(Serialized::defaults(PawsConfig::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::from_figment(figment)
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: PawsConfig = figment
            .extract()
            .map_err(|e| ConfigError::Extract(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deck.size == 0 {
            return Err(ConfigError::EmptyDeck);
        }
        if self.deck.max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        if !(self.deck.retry_multiplier.is_finite() && self.deck.retry_multiplier >= 1.0) {
            return Err(ConfigError::InvalidMultiplier(self.deck.retry_multiplier));
        }
        if self.source.endpoint.trim().is_empty() {
            return Err(ConfigError::Missing("source.endpoint"));
        }
        if self.source.base_origin.trim().is_empty() {
            return Err(ConfigError::Missing("source.base_origin"));
        }
        if self.deck.fallback_url.trim().is_empty() {
            return Err(ConfigError::Missing("deck.fallback_url"));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    Extract(String),

    #[error("deck.size must be greater than 0")]
    EmptyDeck,

    #[error("deck.max_attempts must be greater than 0")]
    NoAttempts,

    #[error("deck.retry_multiplier must be a finite number >= 1.0, got {0}")]
    InvalidMultiplier(f64),

    #[error("{0} must not be empty")]
    Missing(&'static str),
}
