//! Connectivity Checker - Main CLI Application
//!
//! Batch TCP reachability prober: reads server records from a directory of
//! config files, probes every target with bounded concurrency, and writes
//! per-target results and a summary to the console and a per-run log file.

use clap::Parser;
use connectivity_checker::{
    app::App,
    cli::Cli,
    error::{AppError, Result},
    models::RunSummary,
};
use std::error::Error;
use std::process;

#[tokio::main]
async fn main() {
    // Set up better panic handling
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        eprintln!("Please report this issue with the command line that caused it");
        process::exit(1);
    }));

    // Parse command line arguments
    let cli = Cli::parse();

    // Reject conflicting flags before doing any work
    if let Err(message) = cli.validate() {
        eprintln!("Error: {}", message);
        process::exit(2);
    }

    // Handle the actual application logic
    match run_application(cli).await {
        Ok(_summary) => {
            // Summary was already printed by the sink; a completed run exits
            // cleanly even when individual probes failed or were cancelled.
        }
        Err(e) => {
            eprintln!("Error: {}", e);

            if let Some(source) = e.source() {
                eprintln!("Caused by: {}", source);
            }

            // Print suggestions for common errors
            print_error_suggestions(&e);

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<RunSummary> {
    let app = App::new(cli)?;
    app.run().await
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Check that the config directory exists and is readable");
            eprintln!("  - Config files must use the .conf extension");
            eprintln!("  - Each record needs serverIP and serverPort 'key: value' lines");
            eprintln!("  - Check your .env file for invalid PROBE_* values");
        }
        AppError::Validation(_) => {
            eprintln!();
            eprintln!("Validation help:");
            eprintln!("  - --timeout accepts 1-300 seconds");
            eprintln!("  - --retries accepts at most 100 attempts");
            eprintln!("  - --concurrency accepts 1-1024, or 0 for automatic");
        }
        AppError::Resolution(_) => {
            eprintln!();
            eprintln!("DNS resolution help:");
            eprintln!("  - Check if the hostnames in your config files exist");
            eprintln!("  - Test DNS resolution manually with 'nslookup' or 'dig'");
        }
        AppError::Connect(_) => {
            eprintln!();
            eprintln!("Network troubleshooting:");
            eprintln!("  - Check your internet connection");
            eprintln!("  - Verify firewall settings");
            eprintln!("  - Increase the timeout with --timeout");
        }
        AppError::Io(_) | AppError::Sink(_) => {
            eprintln!();
            eprintln!("File output help:");
            eprintln!("  - Check that the log directory exists and is writable");
            eprintln!("  - Choose another location with --log-dir");
        }
        _ => {}
    }
}
