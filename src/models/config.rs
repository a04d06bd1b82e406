//! Probe policy configuration and validation

use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Process-wide probe policy, constant for a run.
///
/// `retry_count` is the TOTAL number of connect attempts per record, with a
/// minimum of one: `--retries 3` means up to three attempts separated by two
/// retry delays, and `--retries 1` means a single attempt with no retry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// TCP connect deadline per attempt, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_seconds: u64,

    /// Total connect attempts per record (minimum one)
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Wait between attempts, in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Maximum probes in flight at once
    #[serde(default = "default_concurrency_limit")]
    pub concurrency_limit: usize,

    /// Directory the per-run log file is created in
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_secs(),
            retry_count: default_retry_count(),
            retry_delay_ms: default_retry_delay_ms(),
            concurrency_limit: default_concurrency_limit(),
            log_dir: default_log_dir(),
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl ProbeConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get connect timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Get retry delay as Duration
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Total attempts the prober will make, never less than one
    pub fn attempts(&self) -> u32 {
        self.retry_count.max(1)
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(AppError::validation("Timeout must be greater than 0"));
        }

        if self.timeout_seconds > crate::defaults::MAX_TIMEOUT_SECONDS {
            return Err(AppError::validation(format!(
                "Timeout cannot exceed {} seconds",
                crate::defaults::MAX_TIMEOUT_SECONDS
            )));
        }

        if self.retry_count > crate::defaults::MAX_RETRY_COUNT {
            return Err(AppError::validation(format!(
                "Retry count cannot exceed {}",
                crate::defaults::MAX_RETRY_COUNT
            )));
        }

        if self.retry_delay_ms > crate::defaults::MAX_RETRY_DELAY_MS {
            return Err(AppError::validation(format!(
                "Retry delay cannot exceed {} ms",
                crate::defaults::MAX_RETRY_DELAY_MS
            )));
        }

        if self.concurrency_limit == 0 {
            return Err(AppError::validation(
                "Concurrency limit must be greater than 0",
            ));
        }

        if self.concurrency_limit > crate::defaults::MAX_CONCURRENCY {
            return Err(AppError::validation(format!(
                "Concurrency limit cannot exceed {}",
                crate::defaults::MAX_CONCURRENCY
            )));
        }

        Ok(())
    }

    /// Merge environment variables into this configuration.
    ///
    /// `PROBE_CONCURRENCY=0` selects an automatic limit from the CPU count,
    /// like `--concurrency 0` on the command line.
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(timeout) = std::env::var("PROBE_TIMEOUT_SECONDS") {
            self.timeout_seconds = timeout.parse().map_err(|e| {
                AppError::validation(format!(
                    "Invalid PROBE_TIMEOUT_SECONDS value '{}': {}",
                    timeout, e
                ))
            })?;
        }

        if let Ok(retries) = std::env::var("PROBE_RETRY_COUNT") {
            self.retry_count = retries.parse().map_err(|e| {
                AppError::validation(format!(
                    "Invalid PROBE_RETRY_COUNT value '{}': {}",
                    retries, e
                ))
            })?;
        }

        if let Ok(delay) = std::env::var("PROBE_RETRY_DELAY_MS") {
            self.retry_delay_ms = delay.parse().map_err(|e| {
                AppError::validation(format!(
                    "Invalid PROBE_RETRY_DELAY_MS value '{}': {}",
                    delay, e
                ))
            })?;
        }

        if let Ok(concurrency) = std::env::var("PROBE_CONCURRENCY") {
            let parsed: usize = concurrency.parse().map_err(|e| {
                AppError::validation(format!(
                    "Invalid PROBE_CONCURRENCY value '{}': {}",
                    concurrency, e
                ))
            })?;
            self.concurrency_limit = if parsed == 0 {
                crate::defaults::auto_concurrency()
            } else {
                parsed
            };
        }

        if let Ok(log_dir) = std::env::var("PROBE_LOG_DIR") {
            if !log_dir.trim().is_empty() {
                self.log_dir = PathBuf::from(log_dir.trim());
            }
        }

        // NO_COLOR is a presence check by convention, any value disables color
        if std::env::var("NO_COLOR").is_ok() {
            self.enable_color = false;
        }

        Ok(())
    }
}

// Default value functions for serde
fn default_timeout_secs() -> u64 {
    crate::defaults::DEFAULT_TIMEOUT.as_secs()
}

fn default_retry_count() -> u32 {
    crate::defaults::DEFAULT_RETRY_COUNT
}

fn default_retry_delay_ms() -> u64 {
    crate::defaults::DEFAULT_RETRY_DELAY.as_millis() as u64
}

fn default_concurrency_limit() -> usize {
    crate::defaults::DEFAULT_CONCURRENCY
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(crate::defaults::DEFAULT_LOG_DIR)
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ProbeConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_values_match_policy() {
        let config = ProbeConfig::default();
        assert_eq!(config.connect_timeout(), Duration::from_secs(5));
        assert_eq!(config.retry_count, 3);
        assert_eq!(config.retry_delay(), Duration::from_millis(1000));
        assert_eq!(config.concurrency_limit, 10);
    }

    #[test]
    fn test_zero_timeout_invalid() {
        let mut config = ProbeConfig::default();
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_concurrency_invalid() {
        let mut config = ProbeConfig::default();
        config.concurrency_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_excessive_concurrency_invalid() {
        let mut config = ProbeConfig::default();
        config.concurrency_limit = crate::defaults::MAX_CONCURRENCY + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_attempts_has_floor_of_one() {
        let mut config = ProbeConfig::default();
        config.retry_count = 0;
        assert_eq!(config.attempts(), 1);
        config.retry_count = 4;
        assert_eq!(config.attempts(), 4);
    }

    #[test]
    fn test_zero_retry_count_is_valid() {
        let mut config = ProbeConfig::default();
        config.retry_count = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serde_defaults_fill_missing_fields() {
        let config: ProbeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.retry_count, 3);
        assert!(config.enable_color);
        assert!(!config.verbose);
    }
}
