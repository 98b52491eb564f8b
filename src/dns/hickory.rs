//! Async DNS resolver using hickory-dns.
//!
//! This resolver provides fully async DNS resolution with support for:
//! - DNS-over-HTTPS (DoH)
//! - DNS-over-TLS (DoT)
//! - System DNS configuration auto-detection
//! - Dual-stack (IPv4 + IPv6) lookup
//!
//! # Performance
//!
//! Unlike `GaiResolver`, this resolver is fully async and doesn't require
//! spawning blocking tasks. It maintains connection pools to DNS servers
//! for better performance under load.

use super::{Query, ResolverResults, Resolve, Resolving};
use crate::base::neterror::NetError;
use hickory_resolver::{
    config::{LookupIpStrategy, ResolverConfig},
    name_server::TokioConnectionProvider,
    TokioResolver,
};
use std::sync::LazyLock;

/// Async DNS resolver backed by hickory-dns.
///
/// The async resolver is lazily initialized on first use and shared across
/// all instances via a static `LazyLock`. It automatically configures
/// itself based on the system's DNS settings.
///
/// Blocking lookups build a short-lived resolver on a private current-thread
/// runtime, so they never touch the shared resolver's connection pool.
///
/// # Example
///
/// ```rust,ignore
/// use peerlink::dns::{HickoryResolver, Protocol, Query, Resolve, ResolveFlags};
///
/// let resolver = HickoryResolver::new();
/// let flags = ResolveFlags::default();
/// let query = Query::new("vpn.example.com", "12000", Protocol::Unspecified, flags);
/// let results = resolver.resolve(query).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HickoryResolver {
    resolver: &'static LazyLock<TokioResolver>,
}

fn build_resolver() -> TokioResolver {
    let mut builder = match TokioResolver::builder_tokio() {
        Ok(builder) => {
            tracing::debug!("Using system DNS configuration");
            builder
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Failed to read system DNS config, using defaults"
            );
            TokioResolver::builder_with_config(
                ResolverConfig::default(),
                TokioConnectionProvider::default(),
            )
        }
    };

    // Protocol filtering happens on our side, so ask for both families.
    builder.options_mut().ip_strategy = LookupIpStrategy::Ipv4AndIpv6;

    builder.build()
}

async fn lookup(resolver: &TokioResolver, query: &Query) -> Result<ResolverResults, NetError> {
    let port = query.port()?;
    if let Some(results) = query.numeric_results(port)? {
        return Ok(results);
    }

    let domain = query.host().as_str();
    tracing::debug!(domain = %domain, "resolving via hickory-dns");

    let answer = resolver.lookup_ip(domain).await.map_err(|e| {
        tracing::debug!(domain = %domain, error = %e, "hickory-dns lookup failed");
        NetError::dns_failed(
            domain,
            std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()),
        )
    })?;

    let results = query.collect_results(port, answer.iter())?;
    tracing::debug!(domain = %domain, count = results.len(), "hickory-dns resolution complete");
    Ok(results)
}

impl HickoryResolver {
    /// Creates a new `HickoryResolver`.
    ///
    /// The underlying resolver is lazily initialized on first DNS query.
    /// It will attempt to read system DNS configuration; if that fails,
    /// it falls back to sensible defaults.
    pub fn new() -> Self {
        static RESOLVER: LazyLock<TokioResolver> = LazyLock::new(build_resolver);

        Self {
            resolver: &RESOLVER,
        }
    }
}

impl Default for HickoryResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolve for HickoryResolver {
    fn resolve(&self, query: Query) -> Resolving {
        let resolver = self.clone();
        Box::pin(async move { lookup(resolver.resolver, &query).await })
    }

    fn resolve_blocking(&self, query: &Query) -> Result<ResolverResults, NetError> {
        let query = query.clone();
        let run = move || -> Result<ResolverResults, NetError> {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| NetError::dns_failed(query.host().as_str(), e))?;
            runtime.block_on(async {
                let resolver = build_resolver();
                lookup(&resolver, &query).await
            })
        };

        // A runtime cannot be blocked on from inside another one.
        if tokio::runtime::Handle::try_current().is_ok() {
            return std::thread::spawn(run).join().map_err(|_| {
                tracing::error!("hickory-dns blocking lookup thread panicked");
                NetError::ResolverTaskFailed
            })?;
        }

        run()
    }
}
