//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PB_DATA_DIR` - Directory for the JSON key-value store
//!   (default: `pocket-bazaar-data` under the current directory)
//! - `PB_SIMULATED_LATENCY_MS` - Artificial delay in milliseconds applied
//!   before every service call, imitating the mobile app's fake network
//!   round-trip (default: none)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Default data directory when `PB_DATA_DIR` is unset.
const DEFAULT_DATA_DIR: &str = "pocket-bazaar-data";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding the JSON key-value store.
    pub data_dir: PathBuf,
    /// Artificial per-call delay simulating a backend round-trip.
    pub simulated_latency: Option<Duration>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `PB_SIMULATED_LATENCY_MS`
    /// is set but not a non-negative integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = std::env::var("PB_DATA_DIR")
            .map_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let simulated_latency = match std::env::var("PB_SIMULATED_LATENCY_MS") {
            Ok(raw) => {
                let ms: u64 = raw.parse().map_err(|_| {
                    ConfigError::InvalidEnvVar(
                        "PB_SIMULATED_LATENCY_MS".to_owned(),
                        format!("expected milliseconds as an integer, got {raw:?}"),
                    )
                })?;
                (ms > 0).then(|| Duration::from_millis(ms))
            }
            Err(_) => None,
        };

        Ok(Self {
            data_dir,
            simulated_latency,
        })
    }

    /// Configuration rooted at an explicit data directory, with no
    /// simulated latency. Used by tests.
    #[must_use]
    pub fn at(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            simulated_latency: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_at_has_no_latency() {
        let config = StorefrontConfig::at("/tmp/pb-test");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/pb-test"));
        assert!(config.simulated_latency.is_none());
    }
}
