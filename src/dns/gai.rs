//! System DNS resolver using getaddrinfo.
//!
//! This resolver uses the operating system's native DNS resolution via
//! `getaddrinfo`. Async lookups run in tokio's blocking thread pool so they
//! never stall the runtime; blocking lookups call it directly.
//!
//! # When to Use
//!
//! - When you need to respect system DNS configuration (/etc/resolv.conf, /etc/hosts)
//! - When DoH/DoT is not required
//! - From synchronous code that has no runtime at hand

use super::{Query, ResolverResults, Resolve, Resolving};
use crate::base::{context::IoResultExt, neterror::NetError};
use std::net::ToSocketAddrs;

/// System DNS resolver using `getaddrinfo`.
///
/// This resolver wraps the standard library's `ToSocketAddrs` trait and
/// executes async resolution in `tokio::task::spawn_blocking` to avoid
/// blocking the async runtime.
///
/// # Performance
///
/// Each async resolution spawns a blocking task. For high-throughput scenarios,
/// consider using `HickoryResolver` which is fully async.
#[derive(Clone, Debug, Default)]
pub struct GaiResolver;

impl GaiResolver {
    /// Creates a new `GaiResolver`.
    pub fn new() -> Self {
        Self
    }

    fn lookup(query: &Query) -> Result<ResolverResults, NetError> {
        let port = query.port()?;
        if let Some(results) = query.numeric_results(port)? {
            return Ok(results);
        }

        let domain = query.host().as_str();
        tracing::debug!(domain = %domain, service = %query.service(), "resolving via getaddrinfo");

        let addrs = (domain, port).to_socket_addrs().dns_context(domain).map_err(|e| {
            tracing::debug!(
                domain = %domain,
                code = e.as_i32(),
                error = %e,
                "DNS resolution failed"
            );
            e
        })?;

        let results = query.collect_results(port, addrs.map(|addr| addr.ip()))?;
        tracing::debug!(domain = %domain, count = results.len(), "DNS resolution complete");
        Ok(results)
    }
}

impl Resolve for GaiResolver {
    fn resolve(&self, query: Query) -> Resolving {
        Box::pin(async move {
            tokio::task::spawn_blocking(move || Self::lookup(&query))
                .await
                // Handle task join error (cancellation, panic)
                .map_err(|e| {
                    tracing::error!(error = %e, "DNS resolution task failed");
                    NetError::ResolverTaskFailed
                })?
        })
    }

    fn resolve_blocking(&self, query: &Query) -> Result<ResolverResults, NetError> {
        Self::lookup(query)
    }
}
