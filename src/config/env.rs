//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env file if it exists
    pub fn load_env_file(debug: bool) -> Result<()> {
        // Try to load .env from current directory
        if Path::new(".env").exists() {
            dotenv::from_filename(".env")
                .map_err(|e| AppError::config(format!("Failed to load .env file: {}", e)))?;

            if debug {
                println!("Loaded configuration from .env file");
            }
        } else if debug {
            println!("No .env file found, using defaults and CLI arguments");
        }

        Ok(())
    }

    /// Validate environment variable format before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            "PROBE_TIMEOUT_SECONDS" => {
                let timeout: u64 = value.parse().map_err(|e| {
                    AppError::config(format!(
                        "Invalid PROBE_TIMEOUT_SECONDS value '{}': {}",
                        value, e
                    ))
                })?;
                if timeout == 0 || timeout > crate::defaults::MAX_TIMEOUT_SECONDS {
                    return Err(AppError::config(format!(
                        "PROBE_TIMEOUT_SECONDS must be between 1 and {}, got: {}",
                        crate::defaults::MAX_TIMEOUT_SECONDS,
                        timeout
                    )));
                }
            }
            "PROBE_RETRY_COUNT" => {
                let count: u32 = value.parse().map_err(|e| {
                    AppError::config(format!(
                        "Invalid PROBE_RETRY_COUNT value '{}': {}",
                        value, e
                    ))
                })?;
                if count > crate::defaults::MAX_RETRY_COUNT {
                    return Err(AppError::config(format!(
                        "PROBE_RETRY_COUNT must be at most {}, got: {}",
                        crate::defaults::MAX_RETRY_COUNT,
                        count
                    )));
                }
            }
            "PROBE_RETRY_DELAY_MS" => {
                let delay: u64 = value.parse().map_err(|e| {
                    AppError::config(format!(
                        "Invalid PROBE_RETRY_DELAY_MS value '{}': {}",
                        value, e
                    ))
                })?;
                if delay > crate::defaults::MAX_RETRY_DELAY_MS {
                    return Err(AppError::config(format!(
                        "PROBE_RETRY_DELAY_MS must be at most {}, got: {}",
                        crate::defaults::MAX_RETRY_DELAY_MS,
                        delay
                    )));
                }
            }
            "PROBE_CONCURRENCY" => {
                let concurrency: usize = value.parse().map_err(|e| {
                    AppError::config(format!(
                        "Invalid PROBE_CONCURRENCY value '{}': {}",
                        value, e
                    ))
                })?;
                // 0 selects the automatic limit, anything above the cap is rejected
                if concurrency > crate::defaults::MAX_CONCURRENCY {
                    return Err(AppError::config(format!(
                        "PROBE_CONCURRENCY must be at most {}, got: {}",
                        crate::defaults::MAX_CONCURRENCY,
                        concurrency
                    )));
                }
            }
            "PROBE_LOG_DIR" => {
                if value.trim().is_empty() {
                    return Err(AppError::config(
                        "PROBE_LOG_DIR must not be empty".to_string(),
                    ));
                }
            }
            _ => {
                // Unknown environment variable, ignore
            }
        }

        Ok(())
    }

    /// Validate every supported variable that is currently set.
    ///
    /// Returns warnings rather than failing; the merge into the probe config
    /// decides what is fatal and reports it with full context.
    pub fn validate_current_env() -> Vec<String> {
        let mut warnings = Vec::new();

        for (var_name, _, _) in Self::get_supported_env_vars() {
            if let Ok(value) = std::env::var(var_name) {
                if let Err(e) = Self::validate_env_var(var_name, &value) {
                    warnings.push(format!("Warning: {}", e));
                }
            }
        }

        warnings
    }

    /// Get list of all supported environment variables with descriptions
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            (
                "PROBE_TIMEOUT_SECONDS",
                "TCP connect timeout per attempt in seconds (1-300)",
                "5",
            ),
            (
                "PROBE_RETRY_COUNT",
                "Total connect attempts per record (0-100, 0 behaves as 1)",
                "3",
            ),
            (
                "PROBE_RETRY_DELAY_MS",
                "Wait between attempts in milliseconds (0-60000)",
                "1000",
            ),
            (
                "PROBE_CONCURRENCY",
                "Maximum probes in flight (1-1024, 0 = auto from CPU count)",
                "10",
            ),
            (
                "PROBE_LOG_DIR",
                "Directory the per-run log file is created in",
                ".",
            ),
            (
                "NO_COLOR",
                "Disable colored output when set to any value",
                "1",
            ),
        ]
    }
}
