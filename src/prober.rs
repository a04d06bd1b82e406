//! TCP probing with retry, timeout and cancellation handling

use crate::models::{ProbeConfig, ProbeResult, ServerRecord};
use crate::resolver::Resolver;
use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

/// Interface for probing a single server record.
///
/// Implementations must produce exactly one result per call, whatever the
/// outcome. The scheduler depends on this to keep its one-result-per-record
/// accounting.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe one record, honoring the cancellation token at wait boundaries.
    async fn probe(&self, cancel: CancellationToken, record: ServerRecord) -> ProbeResult;
}

/// Production prober: resolves the host and attempts raw TCP connects.
///
/// Each attempt re-resolves the host, so a transiently failing DNS server
/// gets the same retry treatment as a refused connection. The connection is
/// dropped as soon as it is established; no data is exchanged.
pub struct TcpProber {
    resolver: Arc<Resolver>,
    config: ProbeConfig,
}

impl TcpProber {
    pub fn new(resolver: Arc<Resolver>, config: ProbeConfig) -> Self {
        Self { resolver, config }
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, cancel: CancellationToken, record: ServerRecord) -> ProbeResult {
        let started = Instant::now();
        let attempts = self.config.attempts();
        let mut attempts_made = 0u32;
        let mut last_error: Option<String> = None;

        for attempt in 1..=attempts {
            if attempt > 1 {
                // Retry wait, cancellation wins over the pending retry
                tokio::select! {
                    _ = cancel.cancelled() => {
                        return ProbeResult::cancelled(
                            record,
                            attempts_made,
                            started.elapsed(),
                            format!("interrupted while waiting to retry (attempt {})", attempt),
                        );
                    }
                    _ = tokio::time::sleep(self.config.retry_delay()) => {}
                }
            }

            if cancel.is_cancelled() {
                return ProbeResult::cancelled(
                    record,
                    attempts_made,
                    started.elapsed(),
                    format!("interrupted before attempt {}", attempt),
                );
            }

            attempts_made = attempt;

            // Re-resolve on every attempt
            let ip = match self.resolver.resolve(&record.server_host).await {
                Ok(ip) => ip,
                Err(e) => {
                    last_error = Some(e.to_string());
                    continue;
                }
            };

            let addr = SocketAddr::new(ip, record.server_port);
            match timeout(self.config.connect_timeout(), TcpStream::connect(addr)).await {
                Ok(Ok(stream)) => {
                    // Reachability is proven, no data is exchanged
                    drop(stream);
                    return ProbeResult::success(record, attempts_made, started.elapsed());
                }
                Ok(Err(e)) => {
                    last_error = Some(format!("connect to {} failed: {}", addr, e));
                }
                Err(_) => {
                    last_error = Some(format!(
                        "connect to {} timed out after {}s",
                        addr, self.config.timeout_seconds
                    ));
                }
            }
        }

        let detail = last_error.unwrap_or_else(|| "no attempts were made".to_string());
        ProbeResult::failed(record, attempts_made, started.elapsed(), detail)
    }
}
