//! Configuration loading and representation.

use std::path::PathBuf;
use std::time::Duration;

use plantpal_auth::SimulatedIdentityProvider;
use plantpal_checkout::SimulatedOrderProcessor;

pub const ENV_DATA_DIR: &str = "PLANTPAL_DATA_DIR";
pub const ENV_AUTH_DELAY_MS: &str = "PLANTPAL_AUTH_DELAY_MS";
pub const ENV_ORDER_DELAY_MS: &str = "PLANTPAL_ORDER_DELAY_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory for the file-backed store; `None` keeps everything in memory.
    pub data_dir: Option<PathBuf>,
    /// Simulated login/signup latency.
    pub auth_delay: Duration,
    /// Simulated order-processing latency.
    pub order_delay: Duration,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            auth_delay: SimulatedIdentityProvider::DEFAULT_DELAY,
            order_delay: SimulatedOrderProcessor::DEFAULT_DELAY,
        }
    }
}

impl StorefrontConfig {
    /// Read `PLANTPAL_*` variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`StorefrontConfig::from_env`] with an injectable lookup (tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let data_dir = lookup(ENV_DATA_DIR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        if data_dir.is_none() {
            tracing::info!(var = ENV_DATA_DIR, "data directory not set; state will not outlive the process");
        }

        Self {
            data_dir,
            auth_delay: delay_from(&lookup, ENV_AUTH_DELAY_MS, defaults.auth_delay),
            order_delay: delay_from(&lookup, ENV_ORDER_DELAY_MS, defaults.order_delay),
        }
    }

    /// No simulated latency; for tests and scripted runs.
    pub fn instant() -> Self {
        Self {
            auth_delay: Duration::ZERO,
            order_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }
}

fn delay_from(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: Duration) -> Duration {
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(ms) => Duration::from_millis(ms),
            Err(_) => {
                tracing::warn!(key, value = %raw, "not a millisecond count; using default");
                default
            }
        },
    }
}
