//! Data models and structures for the connectivity checker

pub mod config;
pub mod record;
pub mod result;

// Re-export main model types
pub use config::ProbeConfig;
pub use record::ServerRecord;
pub use result::{ProbeResult, RunSummary};
