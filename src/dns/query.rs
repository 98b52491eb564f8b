//! Lookup queries: what a resolver is asked to resolve, and how.

use super::resolve::Name;
use super::results::{ResolverEntry, ResolverResults};
use super::service;
use crate::base::neterror::NetError;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    net::{IpAddr, SocketAddr},
    ops::{BitOr, BitOrAssign},
};

/// Address family selector for a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Accept any family.
    #[default]
    Unspecified,
    V4,
    V6,
}

impl Protocol {
    /// Whether `ip` belongs to this family without any mapping.
    pub fn accepts(&self, ip: &IpAddr) -> bool {
        match self {
            Protocol::Unspecified => true,
            Protocol::V4 => ip.is_ipv4(),
            Protocol::V6 => ip.is_ipv6(),
        }
    }
}

/// Resolution flags, modelled on the `getaddrinfo` hint flags.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ResolveFlags(u32);

impl ResolveFlags {
    pub const NONE: Self = Self(0);
    /// Request the canonical name of the host.
    pub const CANONICAL_NAME: Self = Self(0x01);
    /// Results are meant for binding rather than connecting.
    pub const PASSIVE: Self = Self(0x02);
    /// The host must be a numeric address; no name lookup happens.
    pub const NUMERIC_HOST: Self = Self(0x04);
    /// The service must be a numeric port; no service lookup happens.
    pub const NUMERIC_SERVICE: Self = Self(0x08);
    /// With [`Protocol::V6`], return IPv4 results as IPv4-mapped IPv6 addresses.
    pub const V4_MAPPED: Self = Self(0x10);
    /// With [`ResolveFlags::V4_MAPPED`], return mapped IPv4 results alongside native IPv6 ones.
    pub const ALL_MATCHING: Self = Self(0x20);
    /// Only return a family if the host has an address of that family configured.
    pub const ADDRESS_CONFIGURED: Self = Self(0x40);

    const NAMED: [(&'static str, ResolveFlags); 7] = [
        ("canonical_name", Self::CANONICAL_NAME),
        ("passive", Self::PASSIVE),
        ("numeric_host", Self::NUMERIC_HOST),
        ("numeric_service", Self::NUMERIC_SERVICE),
        ("v4_mapped", Self::V4_MAPPED),
        ("all_matching", Self::ALL_MATCHING),
        ("address_configured", Self::ADDRESS_CONFIGURED),
    ];

    #[inline]
    pub const fn bits(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn contains(&self, other: ResolveFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn union(self, other: ResolveFlags) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Names of the flags that are set, in declaration order.
    pub fn names(&self) -> Vec<&'static str> {
        Self::NAMED
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(name, _)| *name)
            .collect()
    }

    /// Looks up a single flag by its lower-case name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMED
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|(_, flag)| *flag)
    }
}

impl Default for ResolveFlags {
    fn default() -> Self {
        Self::ADDRESS_CONFIGURED
    }
}

impl BitOr for ResolveFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for ResolveFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Debug for ResolveFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("ResolveFlags(NONE)");
        }
        write!(f, "ResolveFlags({})", self.names().join(" | "))
    }
}

impl TryFrom<Vec<String>> for ResolveFlags {
    type Error = String;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        names.iter().try_fold(ResolveFlags::NONE, |acc, name| {
            ResolveFlags::from_name(name)
                .map(|flag| acc | flag)
                .ok_or_else(|| format!("unknown resolve flag `{}`", name))
        })
    }
}

impl From<ResolveFlags> for Vec<String> {
    fn from(flags: ResolveFlags) -> Self {
        flags.names().into_iter().map(str::to_string).collect()
    }
}

/// A single lookup request handed to a [`Resolve`](super::Resolve) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    host: Name,
    service: String,
    protocol: Protocol,
    flags: ResolveFlags,
}

impl Query {
    pub fn new(
        host: impl Into<Name>,
        service: impl Into<String>,
        protocol: Protocol,
        flags: ResolveFlags,
    ) -> Self {
        Self {
            host: host.into(),
            service: service.into(),
            protocol,
            flags,
        }
    }

    pub fn host(&self) -> &Name {
        &self.host
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn flags(&self) -> ResolveFlags {
        self.flags
    }

    /// Resolves the query's service to a port number.
    pub fn port(&self) -> Result<u16, NetError> {
        service::resolve_service(&self.service, self.flags)
    }

    /// The host parsed as an IP literal, if it is one.
    pub fn literal_host(&self) -> Option<IpAddr> {
        self.host.as_str().parse().ok()
    }

    /// Answers the query without a lookup when the host is numeric.
    ///
    /// Returns `Ok(None)` when a real name lookup is needed. Fails with
    /// [`NetError::AddressInvalid`] when [`ResolveFlags::NUMERIC_HOST`] is set
    /// and the host is not a literal.
    pub fn numeric_results(&self, port: u16) -> Result<Option<ResolverResults>, NetError> {
        match self.literal_host() {
            Some(ip) => self.collect_results(port, [ip]).map(Some),
            None if self.flags.contains(ResolveFlags::NUMERIC_HOST) => {
                Err(NetError::AddressInvalid)
            }
            None => Ok(None),
        }
    }

    /// Shapes raw lookup addresses into results for this query.
    ///
    /// Applies the protocol filter and IPv4 mapping rules and preserves input
    /// order. An empty outcome is an error, never an empty sequence.
    pub fn collect_results<I>(&self, port: u16, ips: I) -> Result<ResolverResults, NetError>
    where
        I: IntoIterator<Item = IpAddr>,
    {
        let ips: Vec<IpAddr> = ips.into_iter().collect();
        let map_v4 = self.protocol == Protocol::V6 && self.flags.contains(ResolveFlags::V4_MAPPED);
        let has_v6 = ips.iter().any(IpAddr::is_ipv6);
        let keep_mapped = map_v4 && (!has_v6 || self.flags.contains(ResolveFlags::ALL_MATCHING));

        let results: ResolverResults = ips
            .into_iter()
            .filter_map(|ip| match ip {
                IpAddr::V4(v4) if keep_mapped => Some(IpAddr::V6(v4.to_ipv6_mapped())),
                ip if self.protocol.accepts(&ip) => Some(ip),
                _ => None,
            })
            .map(|ip| {
                ResolverEntry::new(
                    SocketAddr::new(ip, port),
                    self.host.as_str(),
                    self.service.as_str(),
                )
            })
            .collect();

        if results.is_empty() {
            return Err(NetError::no_addresses(
                self.host.as_str(),
                "No addresses match the requested protocol",
            ));
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    fn mixed() -> Vec<IpAddr> {
        vec![
            IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)),
            IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1)),
            IpAddr::V4(Ipv4Addr::new(192, 0, 2, 2)),
        ]
    }

    #[test]
    fn test_flags_default_is_address_configured() {
        assert_eq!(ResolveFlags::default(), ResolveFlags::ADDRESS_CONFIGURED);
    }

    #[test]
    fn test_flags_combine() {
        let flags = ResolveFlags::V4_MAPPED | ResolveFlags::ALL_MATCHING;
        assert!(flags.contains(ResolveFlags::V4_MAPPED));
        assert!(flags.contains(ResolveFlags::ALL_MATCHING));
        assert!(!flags.contains(ResolveFlags::PASSIVE));
        assert_eq!(flags.names(), vec!["v4_mapped", "all_matching"]);
        assert_eq!(format!("{:?}", flags), "ResolveFlags(v4_mapped | all_matching)");
    }

    #[test]
    fn test_flags_from_names() {
        let names = vec!["numeric_host".to_string(), "PASSIVE".to_string()];
        let flags = ResolveFlags::try_from(names).unwrap();
        assert_eq!(flags, ResolveFlags::NUMERIC_HOST | ResolveFlags::PASSIVE);

        let err = ResolveFlags::try_from(vec!["bogus".to_string()]).unwrap_err();
        assert!(err.contains("bogus"));
    }

    #[test]
    fn test_collect_unspecified_keeps_order() {
        let query = Query::new("peer.example", "1194", Protocol::Unspecified, ResolveFlags::NONE);
        let results = query.collect_results(1194, mixed()).unwrap();
        let ips: Vec<IpAddr> = results.endpoints().map(|ep| ep.ip()).collect();
        assert_eq!(ips, mixed());
        assert!(results.iter().all(|e| e.endpoint().port() == 1194));
    }

    #[test]
    fn test_collect_filters_by_family() {
        let v4 = Query::new("peer.example", "1", Protocol::V4, ResolveFlags::NONE)
            .collect_results(1, mixed())
            .unwrap();
        assert_eq!(v4.len(), 2);
        assert!(v4.endpoints().all(|ep| ep.is_ipv4()));

        let v6 = Query::new("peer.example", "1", Protocol::V6, ResolveFlags::NONE)
            .collect_results(1, mixed())
            .unwrap();
        assert_eq!(v6.len(), 1);
        assert!(v6.endpoints().all(|ep| ep.is_ipv6()));
    }

    #[test]
    fn test_collect_v4_mapped_only_when_no_v6() {
        let flags = ResolveFlags::V4_MAPPED;
        let query = Query::new("peer.example", "1", Protocol::V6, flags);

        // Native IPv6 present: mapped results are suppressed.
        let results = query.collect_results(1, mixed()).unwrap();
        assert_eq!(results.len(), 1);

        // IPv4 only: mapped results are returned.
        let only_v4 = vec![IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1))];
        let results = query.collect_results(1, only_v4).unwrap();
        let ip = results.first().unwrap().endpoint().ip();
        assert_eq!(ip, IpAddr::V6(Ipv4Addr::new(192, 0, 2, 1).to_ipv6_mapped()));
    }

    #[test]
    fn test_collect_v4_mapped_all_matching() {
        let flags = ResolveFlags::V4_MAPPED | ResolveFlags::ALL_MATCHING;
        let query = Query::new("peer.example", "1", Protocol::V6, flags);
        let results = query.collect_results(1, mixed()).unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.endpoints().all(|ep| ep.is_ipv6()));
    }

    #[test]
    fn test_collect_empty_is_error() {
        let query = Query::new("peer.example", "1", Protocol::V6, ResolveFlags::NONE);
        let only_v4 = vec![IpAddr::V4(Ipv4Addr::LOCALHOST)];
        match query.collect_results(1, only_v4) {
            Err(NetError::NameNotResolvedFor { domain, .. }) => assert_eq!(domain, "peer.example"),
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_numeric_results() {
        let literal = Query::new("192.0.2.7", "80", Protocol::Unspecified, ResolveFlags::NONE);
        let results = literal.numeric_results(80).unwrap().unwrap();
        assert_eq!(results.first().unwrap().endpoint(), "192.0.2.7:80".parse().unwrap());

        let name = Query::new("peer.example", "80", Protocol::Unspecified, ResolveFlags::NONE);
        assert!(name.numeric_results(80).unwrap().is_none());

        let strict =
            Query::new("peer.example", "80", Protocol::Unspecified, ResolveFlags::NUMERIC_HOST);
        assert!(matches!(strict.numeric_results(80), Err(NetError::AddressInvalid)));
    }
}
