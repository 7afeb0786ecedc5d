//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `default_max_results` is outside 1..=20
    /// - `detail_sweep_secs` is 0
    /// - `user_agent` is empty
    ///
    /// Returns `ConfigError::Missing` if `search_url` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bytes == 0 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must be greater than 0".into() });
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must not exceed 50MB".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if !(1..=20).contains(&self.default_max_results) {
            return Err(ConfigError::Invalid {
                field: "default_max_results".into(),
                reason: "must be between 1 and 20".into(),
            });
        }

        if self.detail_sweep_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "detail_sweep_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.search_url.trim().is_empty() {
            return Err(ConfigError::Missing {
                field: "search_url".into(),
                hint: "Set VIDSCOUT_SEARCH_URL environment variable".into(),
            });
        }

        if self.accept_language.is_empty() {
            tracing::warn!("accept_language is empty; search pages may be served degraded");
        }

        Ok(())
    }
}
