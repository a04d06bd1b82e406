//! Error handling for the connectivity checker

use thiserror::Error;

/// Custom error types for the connectivity checker
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors (unreadable directory, no valid records)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors for probe policy values
    #[error("Validation error: {0}")]
    Validation(String),

    /// Per-file parsing errors (malformed config file)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// DNS resolution errors
    #[error("DNS resolution error: {0}")]
    Resolution(String),

    /// TCP connection errors (refused, unreachable, timed out)
    #[error("Connection error: {0}")]
    Connect(String),

    /// Probe aborted by the cancellation signal
    #[error("Cancelled: {0}")]
    Cancelled(String),

    /// Log sink write errors
    #[error("Log write error: {0}")]
    Sink(String),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new DNS resolution error
    pub fn resolution<S: Into<String>>(message: S) -> Self {
        Self::Resolution(message.into())
    }

    /// Create a new connection error
    pub fn connect<S: Into<String>>(message: S) -> Self {
        Self::Connect(message.into())
    }

    /// Create a new cancellation error
    pub fn cancelled<S: Into<String>>(message: S) -> Self {
        Self::Cancelled(message.into())
    }

    /// Create a new log sink error
    pub fn sink<S: Into<String>>(message: S) -> Self {
        Self::Sink(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Validation(_) => "VALIDATION",
            Self::Parse(_) => "PARSE",
            Self::Resolution(_) => "DNS",
            Self::Connect(_) => "CONNECT",
            Self::Cancelled(_) => "CANCELLED",
            Self::Sink(_) => "SINK",
            Self::Io(_) => "IO",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Check if error is recoverable (retried per the probe policy)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Resolution(_) | Self::Connect(_) => true,
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => false,
            Self::Cancelled(_) | Self::Sink(_) | Self::Io(_) | Self::Internal(_) => false,
        }
    }

    /// Check if error aborts the whole run before any probing starts
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Validation(_))
    }

    /// Get user-friendly error message with suggestions
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Config(msg) => {
                format!("Configuration problem: {}\n\nSuggestion: Check the config directory path and that it contains at least one valid server file.", msg)
            }
            Self::Validation(msg) => {
                format!("Invalid input: {}\n\nSuggestion: Check your command line arguments and PROBE_* environment variables.", msg)
            }
            Self::Parse(msg) => {
                format!("Failed to parse a config file: {}\n\nSuggestion: Check the file for 'key: value' lines with appName, serverID, serverIP and serverPort.", msg)
            }
            Self::Resolution(msg) => {
                format!("DNS resolution failed: {}\n\nSuggestion: Check if the hostname exists or use a literal IP address in the config.", msg)
            }
            Self::Connect(msg) => {
                format!("TCP connection failed: {}\n\nSuggestion: The target may be down, firewalled, or the port closed. Increase --timeout if the network is slow.", msg)
            }
            Self::Cancelled(msg) => {
                format!("Run cancelled: {}\n\nRemaining targets were not probed.", msg)
            }
            Self::Sink(msg) => {
                format!("Writing to the log file failed: {}\n\nSuggestion: Check disk space and permissions on the log directory. Console output remains complete.", msg)
            }
            Self::Io(msg) => {
                format!("File operation failed: {}\n\nSuggestion: Check file permissions and disk space.", msg)
            }
            Self::Internal(msg) => {
                format!("Internal error: {}\n\nThis is likely a bug. Please report this issue with the error details.", msg)
            }
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => 1, // Invalid configuration/usage
            Self::Resolution(_) | Self::Connect(_) => 2, // Network issues
            Self::Sink(_) | Self::Io(_) => 5,            // I/O issues
            Self::Cancelled(_) => 130,                   // Interrupted
            Self::Internal(_) => 99,                     // Internal/unexpected errors
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::Validation(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::Resolution(_) | Self::Connect(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Cancelled(_) => {
                    format!("[{}] {}", category.blue().bold(), message.blue())
                }
                Self::Sink(_) | Self::Io(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

// Standard library error conversions
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("JSON error: {}", error))
    }
}

impl From<trust_dns_resolver::error::ResolveError> for AppError {
    fn from(error: trust_dns_resolver::error::ResolveError) -> Self {
        Self::resolution(error.to_string())
    }
}

impl From<dotenv::Error> for AppError {
    fn from(error: dotenv::Error) -> Self {
        Self::config(format!("Environment file error: {}", error))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::parse(format!("Integer parse error: {}", error))
    }
}

// Anyhow integration
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::internal(error.to_string())
    }
}

/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Error reporter for structured error logging and user feedback
pub struct ErrorReporter {
    pub use_color: bool,
    pub verbose: bool,
}

impl ErrorReporter {
    /// Create a new error reporter
    pub fn new(use_color: bool, verbose: bool) -> Self {
        Self { use_color, verbose }
    }

    /// Report an error to the user
    pub fn report_error(&self, error: &AppError) {
        eprintln!("{}", error.format_for_console(self.use_color));

        if self.verbose {
            eprintln!();
            eprintln!("{}", error.user_friendly_message());
        }
    }

    /// Report multiple errors (per-file warnings, typically)
    pub fn report_errors(&self, errors: &[AppError]) {
        for (i, error) in errors.iter().enumerate() {
            if i > 0 {
                eprintln!();
            }
            self.report_error(error);
        }
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}
