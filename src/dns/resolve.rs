//! Core DNS resolution types and traits.
//!
//! This module defines the `Resolve` trait and supporting types that form
//! the foundation of the resolver abstraction consumed by peer endpoints.

use super::query::Query;
use super::results::ResolverResults;
use crate::base::neterror::NetError;
use std::{
    borrow::Cow, collections::HashMap, fmt, future::Future, net::IpAddr, pin::Pin, sync::Arc,
};

/// A domain name to resolve into IP addresses.
///
/// This is a lightweight wrapper around a hostname string that provides
/// a type-safe way to pass domain names to resolvers.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct Name {
    host: Box<str>,
}

impl Name {
    /// Creates a new [`Name`] from any string-like type.
    #[inline]
    pub fn new(host: impl Into<Box<str>>) -> Self {
        Self { host: host.into() }
    }

    /// View the hostname as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.host
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.host.is_empty()
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name::new(value)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.host, f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.host, f)
    }
}

/// Alias for the `Future` type returned by a DNS resolver.
pub type Resolving = Pin<Box<dyn Future<Output = Result<ResolverResults, NetError>> + Send>>;

/// Completion handler for [`Resolve::async_resolve`].
pub type ResolveHandler = Box<dyn FnOnce(Result<ResolverResults, NetError>) + Send>;

/// Owns a [`ResolveHandler`] until it has run.
///
/// A guard dropped before [`CompletionGuard::complete`] runs the handler with
/// [`NetError::ResolverTaskFailed`], so a lookup task torn down by its runtime
/// still reports back.
pub struct CompletionGuard {
    handler: Option<ResolveHandler>,
}

impl CompletionGuard {
    pub fn new(handler: ResolveHandler) -> Self {
        Self {
            handler: Some(handler),
        }
    }

    /// Runs the handler with `result`.
    pub fn complete(mut self, result: Result<ResolverResults, NetError>) {
        if let Some(handler) = self.handler.take() {
            handler(result);
        }
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if let Some(handler) = self.handler.take() {
            let error = NetError::ResolverTaskFailed;
            tracing::debug!(code = error.as_i32(), "lookup dropped before completing");
            handler(Err(error));
        }
    }
}

impl fmt::Debug for CompletionGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionGuard")
            .field("pending", &self.handler.is_some())
            .finish()
    }
}

/// Trait for DNS resolution.
///
/// Implementations must be thread-safe and must either fail or produce a
/// non-empty, ordered [`ResolverResults`].
///
/// # Design Notes
///
/// - Uses `&self` for concurrent resolution without mutable access.
/// - Returns boxed `'static` futures for trait object compatibility.
/// - No cancellation or timeout is imposed here; wrap the future if needed.
pub trait Resolve: Send + Sync {
    /// Resolves a query to transport endpoints.
    fn resolve(&self, query: Query) -> Resolving;

    /// Resolves a query, blocking the calling thread until done.
    ///
    /// The default drives [`Resolve::resolve`] on a local executor, which only
    /// works for futures that need no runtime services. Resolvers backed by
    /// tokio I/O override this.
    fn resolve_blocking(&self, query: &Query) -> Result<ResolverResults, NetError> {
        futures::executor::block_on(self.resolve(query.clone()))
    }

    /// Resolves a query and reports the outcome through `handler`.
    ///
    /// `handler` runs exactly once. The default spawns the lookup on the
    /// current tokio runtime; outside a runtime the handler receives
    /// [`NetError::NoRuntime`] before this call returns. If the runtime drops
    /// the task before it finishes, the handler receives
    /// [`NetError::ResolverTaskFailed`].
    fn async_resolve(&self, query: Query, handler: ResolveHandler) {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let lookup = self.resolve(query);
                let guard = CompletionGuard::new(handler);
                handle.spawn(async move { guard.complete(lookup.await) });
            }
            Err(_) => {
                tracing::debug!(host = %query.host(), "no tokio runtime for async lookup");
                handler(Err(NetError::NoRuntime));
            }
        }
    }
}

/// Blanket implementation for Arc-wrapped resolvers.
impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    fn resolve(&self, query: Query) -> Resolving {
        (**self).resolve(query)
    }

    fn resolve_blocking(&self, query: &Query) -> Result<ResolverResults, NetError> {
        (**self).resolve_blocking(query)
    }

    fn async_resolve(&self, query: Query, handler: ResolveHandler) {
        (**self).async_resolve(query, handler)
    }
}

/// DNS resolver wrapper that supports hostname overrides.
///
/// This resolver first checks a map of hostname-to-address overrides before
/// falling back to the underlying resolver. Useful for:
/// - Testing without real DNS
/// - Pinning well-known peers to fixed addresses
/// - Local development with custom hostnames
///
/// Overridden addresses go through the same protocol filtering and port
/// assignment as real lookups. Overridden `async_resolve` calls complete
/// before returning.
///
/// # Example
///
/// ```rust,ignore
/// use peerlink::dns::{DnsResolverWithOverrides, GaiResolver};
/// use std::collections::HashMap;
///
/// let mut overrides = HashMap::new();
/// overrides.insert("hub.vpn".into(), vec!["10.8.0.1".parse().unwrap()]);
///
/// let resolver = DnsResolverWithOverrides::new(Arc::new(GaiResolver::new()), overrides);
/// ```
pub struct DnsResolverWithOverrides {
    inner: Arc<dyn Resolve>,
    overrides: Arc<HashMap<Cow<'static, str>, Vec<IpAddr>>>,
}

impl DnsResolverWithOverrides {
    /// Creates a new resolver with the given overrides.
    ///
    /// # Arguments
    ///
    /// * `inner` - The fallback resolver for non-overridden hostnames.
    /// * `overrides` - Map of hostnames to their addresses.
    pub fn new(
        inner: Arc<dyn Resolve>,
        overrides: HashMap<Cow<'static, str>, Vec<IpAddr>>,
    ) -> Self {
        Self {
            inner,
            overrides: Arc::new(overrides),
        }
    }

    /// Returns the number of configured overrides.
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    /// Answers `query` from the override table, if it has an entry.
    fn lookup_override(&self, query: &Query) -> Option<Result<ResolverResults, NetError>> {
        let ips = self.overrides.get(query.host().as_str())?;
        tracing::debug!(domain = %query.host(), count = ips.len(), "resolved from overrides");
        Some(
            query
                .port()
                .and_then(|port| query.collect_results(port, ips.iter().copied())),
        )
    }
}

impl Resolve for DnsResolverWithOverrides {
    fn resolve(&self, query: Query) -> Resolving {
        // Check overrides first
        if let Some(result) = self.lookup_override(&query) {
            return Box::pin(std::future::ready(result));
        }
        // Fall back to inner resolver
        self.inner.resolve(query)
    }

    fn resolve_blocking(&self, query: &Query) -> Result<ResolverResults, NetError> {
        match self.lookup_override(query) {
            Some(result) => result,
            None => self.inner.resolve_blocking(query),
        }
    }

    fn async_resolve(&self, query: Query, handler: ResolveHandler) {
        match self.lookup_override(&query) {
            Some(result) => handler(result),
            None => self.inner.async_resolve(query, handler),
        }
    }
}

impl fmt::Debug for DnsResolverWithOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DnsResolverWithOverrides")
            .field("override_count", &self.overrides.len())
            .finish_non_exhaustive()
    }
}
