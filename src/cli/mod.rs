//! Command-line interface module

use crate::config::EnvManager;
use crate::error::Result;
use crate::models::ProbeConfig;
use clap::Parser;
use std::path::PathBuf;

/// Connectivity Checker - batch TCP reachability probing for server fleets
#[derive(Parser, Debug, Clone)]
#[command(name = "conncheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory containing .conf files with server records
    #[arg(value_name = "CONFIG_DIR")]
    pub config_dir: PathBuf,

    /// TCP connect timeout per attempt in seconds
    #[arg(short, long, value_parser = parse_timeout, default_value_t = crate::defaults::DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Total connect attempts per record
    #[arg(short, long, default_value_t = crate::defaults::DEFAULT_RETRY_COUNT)]
    pub retries: u32,

    /// Wait between attempts in milliseconds
    #[arg(long, value_name = "MS", default_value_t = crate::defaults::DEFAULT_RETRY_DELAY.as_millis() as u64)]
    pub retry_delay: u64,

    /// Maximum probes in flight, 0 picks a limit from the CPU count
    #[arg(short, long, default_value_t = crate::defaults::DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Directory the per-run log file is created in
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> std::result::Result<(), String> {
        // Check for conflicting color flags
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        Ok(())
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true // Force color output when --color is specified
        } else if self.no_color {
            false // Disable color output when --no-color is specified
        } else {
            supports_color() // Use automatic detection
        }
    }

    /// Build the probe configuration from defaults, environment, and CLI.
    ///
    /// Precedence from lowest to highest: built-in defaults, `.env` file,
    /// process environment, command-line flags.
    pub fn to_config(&self) -> Result<ProbeConfig> {
        let mut config = ProbeConfig::default();

        // Load from environment file if it exists
        EnvManager::load_env_file(self.debug)?;

        // Surface questionable PROBE_* values early; the merge and the final
        // validation below still decide what is fatal
        for warning in EnvManager::validate_current_env() {
            eprintln!("{}", warning);
        }

        // Merge environment variables into config
        config.merge_from_env()?;

        // Override with CLI arguments
        self.apply_overrides(&mut config);

        // Validate the final configuration
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_overrides(&self, config: &mut ProbeConfig) {
        // Override timeout if specified
        if self.timeout != crate::defaults::DEFAULT_TIMEOUT.as_secs() {
            config.timeout_seconds = self.timeout;
        }

        // Override retry count if specified
        if self.retries != crate::defaults::DEFAULT_RETRY_COUNT {
            config.retry_count = self.retries;
        }

        // Override retry delay if specified
        if self.retry_delay != crate::defaults::DEFAULT_RETRY_DELAY.as_millis() as u64 {
            config.retry_delay_ms = self.retry_delay;
        }

        // Override concurrency if specified, 0 selects the automatic limit
        if self.concurrency == 0 {
            config.concurrency_limit = crate::defaults::auto_concurrency();
        } else if self.concurrency != crate::defaults::DEFAULT_CONCURRENCY {
            config.concurrency_limit = self.concurrency;
        }

        // Override log directory if specified
        if let Some(ref log_dir) = self.log_dir {
            config.log_dir = log_dir.clone();
        }

        // Override color setting
        if self.color {
            config.enable_color = true;
        } else if self.no_color || !supports_color() {
            config.enable_color = false;
        }

        // Set verbose and debug flags (these are CLI-only)
        config.verbose = self.verbose;
        config.debug = self.debug;

        if config.debug {
            println!("Applied CLI overrides to configuration");
            println!(
                "Final config: timeout={}s, retries={}, retry_delay={}ms, concurrency={}",
                config.timeout_seconds,
                config.retry_count,
                config.retry_delay_ms,
                config.concurrency_limit
            );
        }
    }

    /// Get configuration summary for display
    pub fn get_config_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("Configuration Summary:\n");
        summary.push_str(&format!("  Config dir: {}\n", self.config_dir.display()));
        summary.push_str(&format!("  Timeout: {}s\n", self.timeout));
        summary.push_str(&format!("  Retries: {}\n", self.retries));
        summary.push_str(&format!("  Retry delay: {}ms\n", self.retry_delay));
        if self.concurrency == 0 {
            summary.push_str("  Concurrency: auto\n");
        } else {
            summary.push_str(&format!("  Concurrency: {}\n", self.concurrency));
        }
        if let Some(ref log_dir) = self.log_dir {
            summary.push_str(&format!("  Log dir: {}\n", log_dir.display()));
        }
        summary.push_str(&format!("  Colored output: {}\n", self.use_colors()));
        summary.push_str(&format!("  Verbose mode: {}\n", self.verbose));
        summary.push_str(&format!("  Debug mode: {}\n", self.debug));

        summary
    }
}

/// Parse timeout from seconds string
fn parse_timeout(s: &str) -> std::result::Result<u64, String> {
    // Reject strings with leading + sign or other invalid formats
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid timeout: {}", s));
    }

    s.parse::<u64>()
        .map_err(|_| format!("Invalid timeout: {}", s))
        .and_then(|secs| {
            if secs == 0 {
                Err("Timeout must be greater than 0".to_string())
            } else if secs > crate::defaults::MAX_TIMEOUT_SECONDS {
                Err(format!(
                    "Timeout cannot exceed {} seconds",
                    crate::defaults::MAX_TIMEOUT_SECONDS
                ))
            } else {
                Ok(secs)
            }
        })
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    // Check for common environment variables that indicate color support
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    // Check for NO_COLOR environment variable
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check for FORCE_COLOR environment variable
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // Default to true on Unix-like systems, false on Windows
    #[cfg(unix)]
    {
        true
    }
    #[cfg(not(unix))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing_basic() {
        let cli = Cli::parse_from(["test", "servers", "--timeout", "10", "--retries", "5"]);
        assert_eq!(cli.config_dir, PathBuf::from("servers"));
        assert_eq!(cli.timeout, 10);
        assert_eq!(cli.retries, 5);
        assert!(!cli.verbose);
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_parsing_all_options() {
        let cli = Cli::parse_from([
            "test",
            "servers",
            "--timeout",
            "30",
            "--retries",
            "2",
            "--retry-delay",
            "500",
            "--concurrency",
            "32",
            "--log-dir",
            "/tmp/logs",
            "--no-color",
            "--verbose",
            "--debug",
        ]);

        assert_eq!(cli.timeout, 30);
        assert_eq!(cli.retries, 2);
        assert_eq!(cli.retry_delay, 500);
        assert_eq!(cli.concurrency, 32);
        assert_eq!(cli.log_dir, Some(PathBuf::from("/tmp/logs")));
        assert!(cli.no_color);
        assert!(cli.verbose);
        assert!(cli.debug);
    }

    #[test]
    fn test_config_dir_is_required() {
        let result = Cli::try_parse_from(["test"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_color_conflict_rejected() {
        let cli = Cli::parse_from(["test", "servers", "--color", "--no-color"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_timeout_parsing() {
        // Valid timeouts
        assert_eq!(parse_timeout("10").unwrap(), 10);
        assert_eq!(parse_timeout("300").unwrap(), 300);
        assert_eq!(parse_timeout("1").unwrap(), 1);

        // Invalid timeouts
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("301").is_err());
        assert!(parse_timeout("abc").is_err());
        assert!(parse_timeout("-5").is_err());
        assert!(parse_timeout("+5").is_err());
    }

    #[test]
    fn test_cli_overrides_apply() {
        let cli = Cli::parse_from([
            "test",
            "servers",
            "--timeout",
            "9",
            "--retries",
            "7",
            "--retry-delay",
            "250",
            "--concurrency",
            "3",
            "--no-color",
            "--verbose",
        ]);

        let mut config = ProbeConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.timeout_seconds, 9);
        assert_eq!(config.retry_count, 7);
        assert_eq!(config.retry_delay_ms, 250);
        assert_eq!(config.concurrency_limit, 3);
        assert!(!config.enable_color);
        assert!(config.verbose);
    }

    #[test]
    fn test_concurrency_zero_selects_auto() {
        let cli = Cli::parse_from(["test", "servers", "--concurrency", "0"]);

        let mut config = ProbeConfig::default();
        cli.apply_overrides(&mut config);

        assert!(config.concurrency_limit > 0);
        assert!(config.concurrency_limit <= crate::defaults::MAX_CONCURRENCY);
    }

    #[test]
    fn test_defaults_left_alone_when_unspecified() {
        let cli = Cli::parse_from(["test", "servers"]);

        let mut config = ProbeConfig::default();
        // Simulate an environment override applied before CLI processing
        config.retry_count = 9;
        cli.apply_overrides(&mut config);

        // Unspecified CLI flags must not clobber the environment value
        assert_eq!(config.retry_count, 9);
    }

    #[test]
    fn test_config_summary() {
        let cli = Cli::parse_from(["test", "servers", "--timeout", "20", "--verbose"]);

        let summary = cli.get_config_summary();
        assert!(summary.contains("Config dir: servers"));
        assert!(summary.contains("Timeout: 20s"));
        assert!(summary.contains("Verbose mode: true"));
    }
}
