//! Peer endpoints.
//!
//! An [`Endpoint`] names a remote peer in one of three ways: a literal IPv4
//! address, a literal IPv6 address, or a hostname. All three resolve through
//! the same two operations:
//!
//! - [`Endpoint::resolve`] returns one transport endpoint, blocking on the
//!   resolver for hostnames.
//! - [`Endpoint::resolve_async`] reports a [`ResolverResults`] sequence
//!   through a completion that runs exactly once.
//!
//! Literal endpoints never touch the resolver and always complete before
//! `resolve_async` returns. Hostname endpoints complete whenever their
//! resolver does; callers must not assume either ordering for them.
//!
//! # Example
//!
//! ```rust,ignore
//! use peerlink::dns::{GaiResolver, Protocol, ResolveFlags};
//! use peerlink::endpoint::Endpoint;
//!
//! let peer: Endpoint = "192.0.2.1".parse()?;
//! let addr = peer.resolve(&GaiResolver::new(), Protocol::V4, ResolveFlags::default(), "1194")?;
//! assert_eq!(addr.to_string(), "192.0.2.1:1194");
//! ```

mod error;
mod hostname;
mod ip;
mod parse;

pub use error::EndpointError;
pub use hostname::HostnameEndpoint;
pub use ip::{IpEndpoint, IpFamily, Ipv4Endpoint, Ipv6Endpoint};

use crate::config::ResolveOptions;
use crate::dns::{Protocol, ResolveFlags, Resolve, ResolverResults};
use std::net::{IpAddr, SocketAddr};

/// A way of naming a network peer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Ipv4(Ipv4Endpoint),
    Ipv6(Ipv6Endpoint),
    Hostname(HostnameEndpoint),
}

impl Endpoint {
    /// Creates a hostname endpoint; see [`HostnameEndpoint::new`].
    pub fn hostname(
        hostname: impl Into<String>,
        service: Option<String>,
    ) -> Result<Self, EndpointError> {
        HostnameEndpoint::new(hostname, service).map(Endpoint::Hostname)
    }

    /// Whether resolution is computed locally, without a resolver.
    pub fn is_literal(&self) -> bool {
        !matches!(self, Endpoint::Hostname(_))
    }

    /// Resolves to a single transport endpoint.
    pub fn resolve<R: Resolve + ?Sized>(
        &self,
        resolver: &R,
        protocol: Protocol,
        flags: ResolveFlags,
        default_service: &str,
    ) -> Result<SocketAddr, EndpointError> {
        match self {
            Endpoint::Ipv4(ep) => ep.resolve(resolver, protocol, flags, default_service),
            Endpoint::Ipv6(ep) => ep.resolve(resolver, protocol, flags, default_service),
            Endpoint::Hostname(ep) => ep.resolve(resolver, protocol, flags, default_service),
        }
    }

    /// Resolves and reports the outcome through `completion`, exactly once.
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
        match self {
            Endpoint::Ipv4(ep) => {
                ep.resolve_async(resolver, protocol, flags, default_service, completion)
            }
            Endpoint::Ipv6(ep) => {
                ep.resolve_async(resolver, protocol, flags, default_service, completion)
            }
            Endpoint::Hostname(ep) => {
                ep.resolve_async(resolver, protocol, flags, default_service, completion)
            }
        }
    }

    /// [`Endpoint::resolve`] with inputs taken from `options`.
    pub fn resolve_with<R: Resolve + ?Sized>(
        &self,
        resolver: &R,
        options: &ResolveOptions,
    ) -> Result<SocketAddr, EndpointError> {
        self.resolve(resolver, options.protocol, options.flags, &options.default_service)
    }

    /// [`Endpoint::resolve_async`] with inputs taken from `options`.
    pub fn resolve_async_with<R, F>(&self, resolver: &R, options: &ResolveOptions, completion: F)
    where
        R: Resolve + ?Sized,
        F: FnOnce(Result<ResolverResults, EndpointError>) + Send + 'static,
    {
        self.resolve_async(
            resolver,
            options.protocol,
            options.flags,
            &options.default_service,
            completion,
        )
    }
}

impl From<Ipv4Endpoint> for Endpoint {
    fn from(ep: Ipv4Endpoint) -> Self {
        Endpoint::Ipv4(ep)
    }
}

impl From<Ipv6Endpoint> for Endpoint {
    fn from(ep: Ipv6Endpoint) -> Self {
        Endpoint::Ipv6(ep)
    }
}

impl From<HostnameEndpoint> for Endpoint {
    fn from(ep: HostnameEndpoint) -> Self {
        Endpoint::Hostname(ep)
    }
}

/// A bare address: the port comes from the default service.
impl From<IpAddr> for Endpoint {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(v4) => Endpoint::Ipv4(v4.into()),
            IpAddr::V6(v6) => Endpoint::Ipv6(v6.into()),
        }
    }
}

/// A full socket address: the port is explicit.
impl From<SocketAddr> for Endpoint {
    fn from(addr: SocketAddr) -> Self {
        match addr {
            SocketAddr::V4(v4) => Endpoint::Ipv4(IpEndpoint::with_port(*v4.ip(), v4.port())),
            SocketAddr::V6(v6) => Endpoint::Ipv6(IpEndpoint::with_port(*v6.ip(), v6.port())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::GaiResolver;
    use std::net::Ipv4Addr;

    #[test]
    fn test_variant_conversions() {
        let ep = Endpoint::from("192.0.2.1:80".parse::<SocketAddr>().unwrap());
        assert_eq!(ep, Endpoint::Ipv4(Ipv4Endpoint::with_port(Ipv4Addr::new(192, 0, 2, 1), 80)));
        assert!(ep.is_literal());

        let ep = Endpoint::from("::1".parse::<IpAddr>().unwrap());
        assert!(matches!(ep, Endpoint::Ipv6(ref v6) if v6.port().is_none()));

        let ep = Endpoint::hostname("peer.example", None).unwrap();
        assert!(!ep.is_literal());
    }

    #[test]
    fn test_resolve_with_options() {
        let ep = Endpoint::from(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)));
        let options = ResolveOptions::new().default_service("4500");
        let addr = ep.resolve_with(&GaiResolver::new(), &options).unwrap();
        assert_eq!(addr, "192.0.2.1:4500".parse().unwrap());
    }
}
