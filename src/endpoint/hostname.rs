//! Hostname endpoints, resolved through a [`Resolve`] implementation.

use super::EndpointError;
use crate::base::neterror::NetError;
use crate::dns::{Name, Protocol, Query, ResolveFlags, Resolve, ResolverResults};
use std::net::SocketAddr;

/// An endpoint naming a peer by hostname, with an optional service override.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostnameEndpoint {
    hostname: Name,
    service: Option<String>,
}

impl HostnameEndpoint {
    /// Creates a hostname endpoint.
    ///
    /// Fails with [`EndpointError::EmptyHostname`] for an empty hostname. An
    /// empty service override counts as no override.
    ///
    /// A hostname containing `:`, `[` or `]`, or a service containing `:`,
    /// fails with [`EndpointError::InvalidFormat`]: neither could be written
    /// back as endpoint text.
    pub fn new(
        hostname: impl Into<String>,
        service: Option<String>,
    ) -> Result<Self, EndpointError> {
        let hostname = hostname.into();
        if hostname.is_empty() {
            return Err(EndpointError::EmptyHostname);
        }
        if hostname.contains(|c| matches!(c, ':' | '[' | ']')) {
            return Err(EndpointError::invalid_format(
                &hostname,
                "hostname must not contain `:` or brackets",
            ));
        }
        if let Some(service) = service.as_deref().filter(|s| s.contains(':')) {
            return Err(EndpointError::invalid_format(service, "service must not contain `:`"));
        }

        Ok(Self {
            hostname: Name::from(hostname),
            service: service.filter(|s| !s.is_empty()),
        })
    }

    pub fn hostname(&self) -> &Name {
        &self.hostname
    }

    pub fn service(&self) -> Option<&str> {
        self.service.as_deref()
    }

    /// The lookup this endpoint hands to a resolver.
    pub fn query(&self, protocol: Protocol, flags: ResolveFlags, default_service: &str) -> Query {
        let service = self.service.as_deref().unwrap_or(default_service);
        Query::new(self.hostname.clone(), service, protocol, flags)
    }

    /// Resolves through `resolver`, blocking until it answers.
    ///
    /// Returns the first endpoint the resolver produced.
    pub fn resolve<R: Resolve + ?Sized>(
        &self,
        resolver: &R,
        protocol: Protocol,
        flags: ResolveFlags,
        default_service: &str,
    ) -> Result<SocketAddr, EndpointError> {
        let query = self.query(protocol, flags, default_service);
        tracing::debug!(
            host = %self.hostname,
            service = %query.service(),
            "resolving hostname endpoint"
        );

        let mut results = resolver.resolve_blocking(&query)?;
        let entry = results.next().ok_or_else(|| {
            NetError::no_addresses(self.hostname.as_str(), "Resolver returned no addresses")
        })?;
        Ok(entry.endpoint())
    }

    /// Starts a lookup through `resolver` and forwards its outcome to `completion`.
    ///
    /// `completion` may run after this call returns, on whatever context the
    /// resolver completes on. The full result sequence is forwarded.
    pub fn resolve_async<R, F>(
        &self,
        resolver: &R,
        protocol: Protocol,
        flags: ResolveFlags,
        default_service: &str,
        completion: F,
    ) where
        R: Resolve + ?Sized,
        F: FnOnce(Result<ResolverResults, EndpointError>) + Send + 'static,
    {
        let query = self.query(protocol, flags, default_service);
        tracing::debug!(
            host = %self.hostname,
            service = %query.service(),
            "starting async hostname lookup"
        );

        resolver.async_resolve(
            query,
            Box::new(move |result| completion(result.map_err(EndpointError::from))),
        );
    }
}
