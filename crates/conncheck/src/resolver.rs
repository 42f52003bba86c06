//! Host name resolution for the probe targets.
//!
//! Resolution happens once at startup. The whole list must resolve; a single
//! failing host fails the batch and, depending on [`RetryPolicy`], either
//! aborts startup or is retried after a fixed delay.

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to resolve {host}: {source}")]
    Lookup {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no address found for {0}")]
    NoAddress(String),
    #[error("no servers configured")]
    NoTargets,
}

/// Resolver trait, turns `host:port` strings into socket addresses
#[async_trait::async_trait]
pub trait Resolve: Send + Sync {
    /// Resolve every host, preserving input order
    async fn resolve(&self, hosts: &[String]) -> Result<Vec<SocketAddr>, ResolveError>;
}

/// System DNS resolver
#[derive(Debug, Default, Clone, Copy)]
pub struct DnsResolver;

#[async_trait::async_trait]
impl Resolve for DnsResolver {
    async fn resolve(&self, hosts: &[String]) -> Result<Vec<SocketAddr>, ResolveError> {
        let mut resolved = Vec::with_capacity(hosts.len());

        for host in hosts {
            let addrs: Vec<SocketAddr> = tokio::net::lookup_host(host.as_str())
                .await
                .map_err(|source| ResolveError::Lookup { host: host.clone(), source })?
                .collect();

            // Prefer IPv4, the usual route to public STUN servers
            let addr = addrs
                .iter()
                .find(|a| a.is_ipv4())
                .or_else(|| addrs.first())
                .copied()
                .ok_or_else(|| ResolveError::NoAddress(host.clone()))?;
            resolved.push(addr);
        }

        Ok(resolved)
    }
}

/// What to do when resolution fails at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Wait and try again until every host resolves
    Forever,
    /// Give up on the first failure
    FailFast,
}

impl RetryPolicy {
    pub fn from_retry_forever(retry_forever: bool) -> Self {
        if retry_forever { RetryPolicy::Forever } else { RetryPolicy::FailFast }
    }
}

/// Resolve the target list, retrying per `policy` with a fixed `delay`
pub async fn resolve_targets(
    resolver: &dyn Resolve,
    hosts: &[String],
    policy: RetryPolicy,
    delay: Duration,
) -> Result<Vec<SocketAddr>, ResolveError> {
    if hosts.is_empty() {
        return Err(ResolveError::NoTargets);
    }

    loop {
        match resolver.resolve(hosts).await {
            Ok(addrs) => {
                for (host, addr) in hosts.iter().zip(&addrs) {
                    info!("{} {}", host, addr);
                }
                return Ok(addrs);
            }
            Err(e) if policy == RetryPolicy::Forever => {
                warn!("Failed to resolve: {}, waiting {} seconds.", e, delay.as_secs());
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
