//! Probe result and run summary data models

use crate::models::ServerRecord;
use crate::types::ProbeStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of probing one server record.
///
/// Created exactly once per record by the prober and owned by the
/// aggregator after it is sent on the result channel. `elapsed` covers the
/// whole probe including retry waits, not just the last connect attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResult {
    /// The record that was probed
    pub record: ServerRecord,

    /// Final status of the probe
    pub status: ProbeStatus,

    /// Human-readable reason when the probe did not succeed
    pub error_detail: Option<String>,

    /// Number of connect attempts actually made
    pub attempts: u32,

    /// When the probe started
    pub probed_at: DateTime<Utc>,

    /// Wall-clock duration of the whole probe
    pub elapsed: Duration,
}

impl ProbeResult {
    /// Create a successful result
    pub fn success(record: ServerRecord, attempts: u32, elapsed: Duration) -> Self {
        Self {
            record,
            status: ProbeStatus::Success,
            error_detail: None,
            attempts,
            probed_at: Utc::now(),
            elapsed,
        }
    }

    /// Create a failed result carrying the last observed error
    pub fn failed(
        record: ServerRecord,
        attempts: u32,
        elapsed: Duration,
        error_detail: String,
    ) -> Self {
        Self {
            record,
            status: ProbeStatus::Failed,
            error_detail: Some(error_detail),
            attempts,
            probed_at: Utc::now(),
            elapsed,
        }
    }

    /// Create a cancelled result; `detail` notes where the signal was seen
    pub fn cancelled(
        record: ServerRecord,
        attempts: u32,
        elapsed: Duration,
        detail: String,
    ) -> Self {
        Self {
            record,
            status: ProbeStatus::Cancelled,
            error_detail: Some(detail),
            attempts,
            probed_at: Utc::now(),
            elapsed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Status with reason, as shown in log lines ("failure (reason)",
    /// "cancelled (reason)")
    pub fn status_text(&self) -> String {
        match (&self.status, &self.error_detail) {
            (ProbeStatus::Failed, Some(detail)) => format!("failure ({})", detail),
            (ProbeStatus::Cancelled, Some(detail)) => format!("cancelled ({})", detail),
            (status, _) => status.to_string(),
        }
    }
}

/// Aggregated counters and timing statistics for one run.
///
/// Built incrementally by the sink as results arrive; finalized when the
/// result stream closes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Results received so far
    pub total: usize,

    /// Successful probes
    pub success: usize,

    /// Failed probes (retries exhausted)
    pub failure: usize,

    /// Probes aborted by the cancellation signal
    pub cancelled: usize,

    /// Log line writes that failed
    pub sink_errors: usize,

    /// Fastest successful probe
    pub min_elapsed: Option<Duration>,

    /// Slowest successful probe
    pub max_elapsed: Option<Duration>,

    /// Sum of successful probe durations, for the average
    total_success_elapsed: Duration,

    /// Wall-clock duration of the whole run, set at finalization
    pub run_duration: Duration,
}

impl RunSummary {
    pub fn new() -> Self {
        Self {
            total: 0,
            success: 0,
            failure: 0,
            cancelled: 0,
            sink_errors: 0,
            min_elapsed: None,
            max_elapsed: None,
            total_success_elapsed: Duration::ZERO,
            run_duration: Duration::ZERO,
        }
    }

    /// Fold one result into the counters
    pub fn record(&mut self, result: &ProbeResult) {
        self.total += 1;
        match result.status {
            ProbeStatus::Success => {
                self.success += 1;
                self.total_success_elapsed += result.elapsed;
                self.min_elapsed = Some(match self.min_elapsed {
                    Some(min) => min.min(result.elapsed),
                    None => result.elapsed,
                });
                self.max_elapsed = Some(match self.max_elapsed {
                    Some(max) => max.max(result.elapsed),
                    None => result.elapsed,
                });
            }
            ProbeStatus::Failed => self.failure += 1,
            ProbeStatus::Cancelled => self.cancelled += 1,
        }
    }

    /// Note one failed log line write
    pub fn record_sink_error(&mut self) {
        self.sink_errors += 1;
    }

    /// Average elapsed over successful probes, if any succeeded
    pub fn avg_elapsed(&self) -> Option<Duration> {
        if self.success == 0 {
            None
        } else {
            Some(self.total_success_elapsed / self.success as u32)
        }
    }

    /// Success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.success as f64 / self.total as f64) * 100.0
        }
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ServerRecord {
        ServerRecord::new("app", 1, "127.0.0.1", 8080)
    }

    #[test]
    fn test_success_result() {
        let result = ProbeResult::success(sample_record(), 1, Duration::from_millis(12));
        assert!(result.is_success());
        assert!(result.error_detail.is_none());
        assert_eq!(result.status_text(), "success");
    }

    #[test]
    fn test_failed_result_carries_reason() {
        let result = ProbeResult::failed(
            sample_record(),
            3,
            Duration::from_secs(2),
            "connection refused".to_string(),
        );
        assert!(!result.is_success());
        assert_eq!(result.attempts, 3);
        assert_eq!(result.status_text(), "failure (connection refused)");
    }

    #[test]
    fn test_cancelled_result_carries_reason() {
        let result = ProbeResult::cancelled(
            sample_record(),
            1,
            Duration::from_millis(5),
            "interrupted while waiting to retry (attempt 2)".to_string(),
        );
        assert_eq!(result.status, ProbeStatus::Cancelled);
        assert_eq!(
            result.status_text(),
            "cancelled (interrupted while waiting to retry (attempt 2))"
        );
        assert!(result.error_detail.unwrap().contains("waiting to retry"));
    }

    #[test]
    fn test_summary_counters() {
        let mut summary = RunSummary::new();
        summary.record(&ProbeResult::success(
            sample_record(),
            1,
            Duration::from_millis(100),
        ));
        summary.record(&ProbeResult::success(
            sample_record(),
            1,
            Duration::from_millis(300),
        ));
        summary.record(&ProbeResult::failed(
            sample_record(),
            3,
            Duration::from_secs(6),
            "timed out".to_string(),
        ));

        assert_eq!(summary.total, 3);
        assert_eq!(summary.success, 2);
        assert_eq!(summary.failure, 1);
        assert_eq!(summary.cancelled, 0);
        assert_eq!(summary.min_elapsed, Some(Duration::from_millis(100)));
        assert_eq!(summary.max_elapsed, Some(Duration::from_millis(300)));
        assert_eq!(summary.avg_elapsed(), Some(Duration::from_millis(200)));
        assert!((summary.success_rate() - 66.66).abs() < 1.0);
    }

    #[test]
    fn test_summary_without_successes() {
        let mut summary = RunSummary::new();
        summary.record(&ProbeResult::failed(
            sample_record(),
            2,
            Duration::from_secs(1),
            "refused".to_string(),
        ));
        assert_eq!(summary.avg_elapsed(), None);
        assert_eq!(summary.min_elapsed, None);
        assert_eq!(summary.success_rate(), 0.0);
    }

    #[test]
    fn test_summary_counts_cancelled_separately() {
        let mut summary = RunSummary::new();
        summary.record(&ProbeResult::cancelled(
            sample_record(),
            0,
            Duration::ZERO,
            "interrupted before attempt 1".to_string(),
        ));
        assert_eq!(summary.total, 1);
        assert_eq!(summary.failure, 0);
        assert_eq!(summary.cancelled, 1);
    }
}
