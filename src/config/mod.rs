//! Configuration management module

pub mod env;
pub mod loader;

// Re-export main functionality
pub use env::EnvManager;
pub use loader::{load_records, parse_record_file, LoadOutcome};

// Re-export from models for convenience
pub use crate::models::ProbeConfig;
