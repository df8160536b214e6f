//! Engine configuration management
//!
//! Process-level settings are loaded from environment variables (and a
//! `.env` file when present). Per-run settings such as the real-time cutoff
//! live in [`RunOptions`] instead, since every recomputation may use a
//! different value.

use std::env;
use std::sync::LazyLock;

use ranklist_common::TimeDuration;

use crate::constants::{env_vars, DEFAULT_LOG_FILTER, DEFAULT_PREFERRED_LANGUAGE};

/// Global engine configuration (lazily initialized)
pub static CONFIG: LazyLock<EngineConfig> = LazyLock::new(|| {
    EngineConfig::from_env().unwrap_or_else(|e| {
        tracing::warn!("Falling back to default engine configuration: {}", e);
        EngineConfig::default()
    })
});

/// Main engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Compute independent rank series on the rayon pool
    pub parallel_series: bool,
    /// Language tag used when resolving localized text
    pub preferred_language: String,
    /// Rewrite solutions inside the frozen window to `?`
    pub apply_freeze: bool,
    /// Log filter directive for the binary
    pub rust_log: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel_series: true,
            preferred_language: DEFAULT_PREFERRED_LANGUAGE.to_string(),
            apply_freeze: false,
            rust_log: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Ok(Self {
            parallel_series: parse_bool(env_vars::PARALLEL_SERIES, defaults.parallel_series)?,
            preferred_language: env::var(env_vars::PREFERRED_LANGUAGE)
                .unwrap_or(defaults.preferred_language),
            apply_freeze: parse_bool(env_vars::APPLY_FREEZE, defaults.apply_freeze)?,
            rust_log: env::var(env_vars::RUST_LOG).unwrap_or(defaults.rust_log),
        })
    }

    /// Run options seeded from this configuration
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            cutoff: None,
            apply_freeze: self.apply_freeze,
        }
    }
}

fn parse_bool(name: &str, default: bool) -> Result<bool, ConfigError> {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue(name.to_string())),
        },
        Err(_) => Ok(default),
    }
}

/// Options for a single engine run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Ignore solutions submitted after this time since contest start.
    /// Takes precedence over the document's `_now`.
    pub cutoff: Option<TimeDuration>,
    /// Rewrite solutions inside the frozen window to `?`
    pub apply_freeze: bool,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
