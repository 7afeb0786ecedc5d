//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (VIDSCOUT_*)
//! 2. TOML config file (if VIDSCOUT_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Desktop Chrome user agent; the search page degrades for unknown clients.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (VIDSCOUT_*)
/// 2. TOML config file (if VIDSCOUT_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to SQLite query cache database.
    ///
    /// Set via VIDSCOUT_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Search results page of the video platform.
    ///
    /// Set via VIDSCOUT_SEARCH_URL environment variable.
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via VIDSCOUT_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Accept-Language header for HTTP requests.
    ///
    /// Set via VIDSCOUT_ACCEPT_LANGUAGE environment variable.
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Maximum bytes to fetch per request.
    ///
    /// Set via VIDSCOUT_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via VIDSCOUT_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Result limit used when a caller omits or garbles `max_results`.
    ///
    /// Set via VIDSCOUT_DEFAULT_MAX_RESULTS environment variable.
    #[serde(default = "default_max_results")]
    pub default_max_results: usize,

    /// Interval between detail cache sweeps in seconds.
    ///
    /// Set via VIDSCOUT_DETAIL_SWEEP_SECS environment variable.
    #[serde(default = "default_detail_sweep_secs")]
    pub detail_sweep_secs: u64,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./vidscout-cache.sqlite")
}

fn default_search_url() -> String {
    "https://www.youtube.com/results".into()
}

fn default_user_agent() -> String {
    BROWSER_USER_AGENT.into()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.9".into()
}

fn default_max_bytes() -> usize {
    10 * 1024 * 1024 // 10MB
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_results() -> usize {
    15
}

fn default_detail_sweep_secs() -> u64 {
    60
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            search_url: default_search_url(),
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            max_bytes: default_max_bytes(),
            timeout_ms: default_timeout_ms(),
            default_max_results: default_max_results(),
            detail_sweep_secs: default_detail_sweep_secs(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Detail cache sweep interval.
    pub fn detail_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.detail_sweep_secs)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `VIDSCOUT_`
    /// 2. TOML file from `VIDSCOUT_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("VIDSCOUT_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("VIDSCOUT_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
