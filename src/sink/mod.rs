//! Result sink: console output plus a per-run log file
//!
//! The sink owns the receiving end of the result channel. Every result is
//! printed to the console and appended to a timestamped log file created
//! fresh for each run. Failing to create the file aborts the run; failing to
//! write a line does not, it is reported once and counted in the summary.

use crate::error::{AppError, Result};
use crate::models::{ProbeConfig, ProbeResult, RunSummary};
use crate::output::OutputFormatter;
use chrono::Local;
use colored::Colorize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::sync::mpsc;

/// Drains probe results into the console and the run's log file.
pub struct ResultSink {
    file: File,
    log_path: PathBuf,
    console: OutputFormatter,
    file_format: OutputFormatter,
    use_colors: bool,
    warned_write_failure: bool,
}

impl ResultSink {
    /// Create the log file for this run and write its header.
    ///
    /// The file is named `connectinfo_<timestamp>.log` and placed in the
    /// configured log directory. Creation failure is fatal: a run that cannot
    /// persist its results should not start probing.
    pub fn create(config: &ProbeConfig, run_id: &str) -> Result<Self> {
        let filename = format!("connectinfo_{}.log", Local::now().format("%Y-%m-%d_%H%M%S"));
        let log_path = config.log_dir.join(filename);

        let mut file = File::create(&log_path).map_err(|e| {
            AppError::io(format!(
                "failed to create log file {}: {}",
                log_path.display(),
                e
            ))
        })?;

        writeln!(file, "# conncheck run {}", run_id)
            .and_then(|_| writeln!(file, "# started {}", Local::now().format("%Y-%m-%d %H:%M:%S")))
            .map_err(|e| {
                AppError::io(format!(
                    "failed to write log header to {}: {}",
                    log_path.display(),
                    e
                ))
            })?;

        Ok(Self {
            file,
            log_path,
            console: OutputFormatter::new(config.enable_color),
            file_format: OutputFormatter::plain(),
            use_colors: config.enable_color,
            warned_write_failure: false,
        })
    }

    /// Path of the log file backing this sink
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Receive results until the channel closes, then emit the summary.
    ///
    /// Each result is counted, printed to the console, and appended to the
    /// log file. The summary block goes to both targets as well, so the file
    /// is self-contained.
    pub async fn drain(
        &mut self,
        mut receiver: mpsc::Receiver<ProbeResult>,
        run_started: Instant,
    ) -> RunSummary {
        let mut summary = RunSummary::new();

        while let Some(result) = receiver.recv().await {
            summary.record(&result);
            println!("{}", self.console.format_result_line(&result));
            let line = self.file_format.format_result_line(&result);
            self.write_line(&line, &mut summary);
        }

        summary.run_duration = run_started.elapsed();

        println!("{}", self.console.format_summary(&summary, &self.log_path));
        let block = self.file_format.format_summary(&summary, &self.log_path);
        self.write_line(&block, &mut summary);

        summary
    }

    /// Append one line to the log file, degrading to console-only on failure
    fn write_line(&mut self, line: &str, summary: &mut RunSummary) {
        if let Err(e) = writeln!(self.file, "{}", line) {
            summary.record_sink_error();
            if !self.warned_write_failure {
                self.warned_write_failure = true;
                let prefix = if self.use_colors {
                    "warning".yellow().bold().to_string()
                } else {
                    "warning".to_string()
                };
                eprintln!(
                    "{}: failed to write to {}: {} (console output continues)",
                    prefix,
                    self.log_path.display(),
                    e
                );
            }
        }
    }
}
