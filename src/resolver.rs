//! Hostname resolution for probe targets

use crate::error::{AppError, Result};
use std::net::IpAddr;
use trust_dns_resolver::{
    config::{ResolverConfig, ResolverOpts},
    system_conf, TokioAsyncResolver,
};

/// Resolves probe target hosts to IP addresses.
///
/// Literal IP addresses pass through without any network call. Hostnames go
/// through a forward DNS lookup and the first returned address is used; the
/// order of addresses is resolver-dependent, so which one is selected is not
/// stable across runs or environments.
pub struct Resolver {
    inner: TokioAsyncResolver,
}

impl Resolver {
    /// Create a resolver from the system DNS configuration, falling back to
    /// the library defaults when the system configuration is unreadable.
    pub fn new() -> Self {
        let (config, opts) = system_conf::read_system_conf()
            .unwrap_or_else(|_| (ResolverConfig::default(), ResolverOpts::default()));
        Self {
            inner: TokioAsyncResolver::tokio(config, opts),
        }
    }

    /// Resolve a host to a single IP address.
    ///
    /// Fails with a resolution error when the lookup errors or returns zero
    /// addresses. Resolution failure is terminal for the current attempt;
    /// the prober re-resolves on every retry.
    pub async fn resolve(&self, host: &str) -> Result<IpAddr> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(ip);
        }

        let response = self
            .inner
            .lookup_ip(host)
            .await
            .map_err(|e| AppError::resolution(format!("DNS lookup failed for {}: {}", host, e)))?;

        response
            .iter()
            .next()
            .ok_or_else(|| AppError::resolution(format!("No addresses returned for {}", host)))
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}
