//! Output formatting for result lines and the run summary
//!
//! One fixed line shape per probe result, written identically to the console
//! and the log file (the console copy may color the status word), plus the
//! trailing summary block.

use crate::models::{ProbeResult, RunSummary};
use crate::types::ProbeStatus;
use colored::Colorize;
use std::path::Path;
use std::time::Duration;

/// Formats result lines and summaries, optionally with color.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    use_colors: bool,
}

impl OutputFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formatter for the log file, never colored
    pub fn plain() -> Self {
        Self::new(false)
    }

    /// One line per probe result:
    /// `[ts] Server ID: .., App: .., Host: .., Port: .., Elapsed: .., Status: ..`
    pub fn format_result_line(&self, result: &ProbeResult) -> String {
        format!(
            "[{}] Server ID: {}, App: {}, Host: {}, Port: {}, Elapsed: {}, Status: {}",
            result.probed_at.format("%Y-%m-%d %H:%M:%S"),
            result.record.server_id,
            result.record.app_name,
            result.record.server_host,
            result.record.server_port,
            self.format_duration(result.elapsed),
            self.status_text(result),
        )
    }

    fn status_text(&self, result: &ProbeResult) -> String {
        let text = result.status_text();
        if !self.use_colors {
            return text;
        }
        match result.status {
            ProbeStatus::Success => text.green().to_string(),
            ProbeStatus::Failed => text.red().to_string(),
            ProbeStatus::Cancelled => text.blue().to_string(),
        }
    }

    /// The trailing summary block, written to console and log file
    pub fn format_summary(&self, summary: &RunSummary, log_path: &Path) -> String {
        let mut output = String::new();

        let headline = "Check complete!";
        if self.use_colors {
            output.push_str(&headline.bold().to_string());
        } else {
            output.push_str(headline);
        }
        output.push('\n');

        output.push_str(&format!("Total: {}\n", summary.total));
        output.push_str(&format!("Success: {}\n", summary.success));
        output.push_str(&format!("Failure: {}\n", summary.failure));
        if summary.cancelled > 0 {
            output.push_str(&format!("Cancelled: {}\n", summary.cancelled));
        }

        if let (Some(min), Some(avg), Some(max)) =
            (summary.min_elapsed, summary.avg_elapsed(), summary.max_elapsed)
        {
            output.push_str(&format!(
                "Fastest: {}, Average: {}, Slowest: {}\n",
                self.format_duration(min),
                self.format_duration(avg),
                self.format_duration(max),
            ));
        }

        if summary.sink_errors > 0 {
            output.push_str(&format!(
                "Log write failures: {} (console output is complete)\n",
                summary.sink_errors
            ));
        }

        output.push_str(&format!(
            "Total duration: {}\n",
            self.format_duration(summary.run_duration)
        ));
        output.push_str(&format!("Results saved to: {}", log_path.display()));

        output
    }

    /// Format duration in human-readable format
    pub fn format_duration(&self, duration: Duration) -> String {
        let ms = duration.as_secs_f64() * 1000.0;
        if ms < 1.0 {
            format!("{:.2}μs", ms * 1000.0)
        } else if ms < 1000.0 {
            format!("{:.1}ms", ms)
        } else if ms < 60000.0 {
            format!("{:.2}s", ms / 1000.0)
        } else {
            let minutes = (ms / 60000.0) as u32;
            let seconds = (ms % 60000.0) / 1000.0;
            format!("{}m{:.1}s", minutes, seconds)
        }
    }
}
