//! Server record data model

use serde::{Deserialize, Serialize};

/// One target to probe, parsed from a config file.
///
/// Records are immutable once produced by the loader. Uniqueness is not
/// enforced; duplicate records are probed independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRecord {
    /// Human-readable application name
    pub app_name: String,

    /// Numeric server identifier from the config file
    pub server_id: u32,

    /// Target host: a literal IP address or a DNS name
    pub server_host: String,

    /// Target TCP port (1-65535)
    pub server_port: u16,
}

impl ServerRecord {
    pub fn new<S: Into<String>, H: Into<String>>(
        app_name: S,
        server_id: u32,
        server_host: H,
        server_port: u16,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            server_id,
            server_host: server_host.into(),
            server_port,
        }
    }

    /// `host:port` form used in error messages
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl std::fmt::Display for ServerRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (id {}) at {}",
            self.app_name,
            self.server_id,
            self.endpoint()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_format() {
        let record = ServerRecord::new("web-frontend", 12, "10.0.0.5", 443);
        assert_eq!(record.endpoint(), "10.0.0.5:443");
    }

    #[test]
    fn test_display_includes_all_identifiers() {
        let record = ServerRecord::new("billing", 7, "billing.internal", 8080);
        let text = record.to_string();
        assert!(text.contains("billing"));
        assert!(text.contains("7"));
        assert!(text.contains("billing.internal:8080"));
    }

    #[test]
    fn test_serde_round_trip() {
        let record = ServerRecord::new("api", 3, "192.168.1.20", 9000);
        let json = serde_json::to_string(&record).unwrap();
        let back: ServerRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
