//! Main application orchestration and execution

use crate::{
    cli::Cli,
    config::load_records,
    error::{ErrorReporter, Result},
    logging::Logger,
    models::RunSummary,
    prober::{Prober, TcpProber},
    resolver::Resolver,
    scheduler::Scheduler,
    sink::ResultSink,
};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Main application struct that coordinates all components
pub struct App {
    cli: Cli,
}

impl App {
    /// Create a new application instance with CLI configuration
    pub fn new(cli: Cli) -> Result<Self> {
        Ok(Self { cli })
    }

    /// Run the full check: load records, probe them all, emit the summary.
    ///
    /// Returns the run summary so the binary can report on it. Fatal errors
    /// (bad configuration, unreadable directory, log file creation) abort
    /// before the first probe is dispatched.
    pub async fn run(self) -> Result<RunSummary> {
        let config = self.cli.to_config()?;
        let reporter = ErrorReporter::new(config.enable_color, config.verbose);

        println!("Connectivity Checker v{}", crate::VERSION);

        if config.debug {
            println!();
            println!("{}", self.cli.get_config_summary());
        }

        let run_id = Uuid::new_v4().to_string();
        let logger =
            Logger::with_config("conncheck".to_string(), &config).with_run_id(run_id.clone());

        // Load server records, reporting per-file warnings as we go
        let outcome = load_records(&self.cli.config_dir)?;
        if !outcome.warnings.is_empty() {
            reporter.report_errors(&outcome.warnings);
        }
        logger
            .info("server records loaded")
            .field("records", outcome.records.len())
            .field("skipped_files", outcome.warnings.len())
            .emit();

        // The log file must exist before any probe runs
        let mut sink = ResultSink::create(&config, &run_id)?;
        if config.verbose {
            println!("Logging results to {}", sink.log_path().display());
        }

        let resolver = Arc::new(Resolver::new());
        let prober: Arc<dyn Prober> = Arc::new(TcpProber::new(resolver, config.clone()));
        let scheduler = Scheduler::new(prober, config.concurrency_limit);

        // Ctrl-C flips the token; in-flight connects finish, waits abort
        let cancel = CancellationToken::new();
        let signal_cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!();
                eprintln!("Interrupt received, cancelling outstanding probes...");
                signal_cancel.cancel();
            }
        });

        println!(
            "Checking {} servers (concurrency {}, timeout {}s, attempts {})",
            outcome.records.len(),
            config.concurrency_limit,
            config.timeout_seconds,
            config.attempts()
        );
        println!();

        let run_started = Instant::now();
        let receiver = scheduler.run(cancel.clone(), outcome.records);
        let summary = sink.drain(receiver, run_started).await;

        logger
            .debug("run complete")
            .field("total", summary.total)
            .field("success", summary.success)
            .field("failure", summary.failure)
            .field("cancelled", summary.cancelled)
            .field("sink_errors", summary.sink_errors)
            .emit();

        Ok(summary)
    }
}
