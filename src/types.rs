//! Type definitions and aliases

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Outcome of a single probe (the whole retry sequence, not one attempt)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeStatus {
    /// A TCP connection was established within the timeout
    Success,
    /// Every attempt failed (connect error, timeout, or resolution error)
    Failed,
    /// The cancellation signal fired before the probe could finish
    Cancelled,
}

impl ProbeStatus {
    /// Lowercase keyword used in log lines and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failure",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl std::fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
