//! Connectivity Checker
//!
//! A batch TCP reachability prober: reads server records from a directory of
//! config files, probes each target with bounded concurrency and a
//! retry/timeout policy, and writes per-target results plus a summary to the
//! console and a per-run log file.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod prober;
pub mod resolver;
pub mod scheduler;
pub mod sink;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, ErrorReporter, Result};
pub use models::{ProbeConfig, ProbeResult, RunSummary, ServerRecord};
pub use prober::{Prober, TcpProber};
pub use resolver::Resolver;
pub use scheduler::Scheduler;
pub use sink::ResultSink;
pub use types::ProbeStatus;

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
    pub const DEFAULT_RETRY_COUNT: u32 = 3;
    pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);
    pub const DEFAULT_CONCURRENCY: usize = 10;
    pub const DEFAULT_LOG_DIR: &str = ".";
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    pub const MAX_TIMEOUT_SECONDS: u64 = 300;
    pub const MAX_RETRY_COUNT: u32 = 100;
    pub const MAX_RETRY_DELAY_MS: u64 = 60_000;
    pub const MAX_CONCURRENCY: usize = 1024;

    /// Concurrency limit picked when the user asks for automatic sizing.
    ///
    /// Twice the CPU count works well for a workload that is almost entirely
    /// waiting on connect timeouts, clamped to keep small and huge machines
    /// sensible.
    pub fn auto_concurrency() -> usize {
        (num_cpus::get() * 2).clamp(4, 64)
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_auto_concurrency_stays_in_bounds() {
        let limit = super::defaults::auto_concurrency();
        assert!(limit >= 4);
        assert!(limit <= 64);
    }
}
