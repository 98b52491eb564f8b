//! Literal IPv4 / IPv6 endpoints.

use super::EndpointError;
use crate::dns::{service, Protocol, ResolveFlags, Resolve, ResolverResults};
use std::{
    fmt,
    hash::Hash,
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr},
};

mod sealed {
    pub trait Sealed {}
    impl Sealed for std::net::Ipv4Addr {}
    impl Sealed for std::net::Ipv6Addr {}
}

/// An IP address family usable as an [`IpEndpoint`] address.
pub trait IpFamily:
    sealed::Sealed
    + Copy
    + Eq
    + Hash
    + fmt::Debug
    + fmt::Display
    + Into<IpAddr>
    + Send
    + Sync
    + 'static
{
}

impl IpFamily for Ipv4Addr {}

impl IpFamily for Ipv6Addr {}

/// An endpoint naming a peer by literal address and optional port.
///
/// Resolution never performs I/O: the address is fixed and only the port may
/// come from the caller's default service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpEndpoint<A: IpFamily> {
    address: A,
    port: Option<u16>,
}

pub type Ipv4Endpoint = IpEndpoint<Ipv4Addr>;
pub type Ipv6Endpoint = IpEndpoint<Ipv6Addr>;

impl<A: IpFamily> IpEndpoint<A> {
    pub fn new(address: A, port: Option<u16>) -> Self {
        Self { address, port }
    }

    pub fn with_port(address: A, port: u16) -> Self {
        Self::new(address, Some(port))
    }

    pub fn address(&self) -> A {
        self.address
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Resolves to a transport endpoint.
    ///
    /// An explicit port wins. Otherwise `default_service` must be a numeric
    /// port, or this fails with [`EndpointError::InvalidServiceFormat`].
    /// `resolver`, `protocol` and `flags` are not consulted.
    pub fn resolve<R: Resolve + ?Sized>(
        &self,
        _resolver: &R,
        _protocol: Protocol,
        _flags: ResolveFlags,
        default_service: &str,
    ) -> Result<SocketAddr, EndpointError> {
        let port = match self.port {
            Some(port) => port,
            None => service::parse_port(default_service)
                .ok_or_else(|| EndpointError::invalid_service(default_service))?,
        };
        Ok(SocketAddr::new(self.address.into(), port))
    }

    /// Resolves and reports through `completion` before returning.
    ///
    /// The single-entry result is built from the computed endpoint; the
    /// resolver is never asked.
    pub fn resolve_async<R, F>(
        &self,
        resolver: &R,
        protocol: Protocol,
        flags: ResolveFlags,
        default_service: &str,
        completion: F,
    ) where
        R: Resolve + ?Sized,
        F: FnOnce(Result<ResolverResults, EndpointError>),
    {
        let result = self
            .resolve(resolver, protocol, flags, default_service)
            .map(|ep| ResolverResults::create(ep, ep.ip().to_string(), ep.port().to_string()));
        completion(result);
    }
}

impl<A: IpFamily> From<A> for IpEndpoint<A> {
    fn from(address: A) -> Self {
        Self::new(address, None)
    }
}
