//! Text form of endpoints, as found in configuration files.
//!
//! | Text                      | Endpoint                          |
//! |---------------------------|-----------------------------------|
//! | `192.0.2.1`               | IPv4, no port                     |
//! | `192.0.2.1:1194`          | IPv4, port 1194                   |
//! | `2001:db8::1`, `[2001:db8::1]` | IPv6, no port                |
//! | `[2001:db8::1]:1194`      | IPv6, port 1194                   |
//! | `vpn.example.com`         | hostname, no service              |
//! | `vpn.example.com:openvpn` | hostname, service `openvpn`       |
//!
//! `Display` writes the same forms back. A hostname endpoint whose name is an
//! IPv4 literal reads back as an IPv4 endpoint; if its service is not a port
//! number it has no text form, and serializing it fails.

use super::{Endpoint, EndpointError, HostnameEndpoint, IpEndpoint};
use crate::dns::service;
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt,
    net::{Ipv4Addr, Ipv6Addr},
    str::FromStr,
};

fn literal_port(service: &str) -> Result<u16, EndpointError> {
    service::parse_port(service).ok_or_else(|| EndpointError::invalid_service(service))
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.is_empty() {
            return Err(EndpointError::EmptyHostname);
        }

        if let Some(rest) = input.strip_prefix('[') {
            let (address, tail) = rest
                .split_once(']')
                .ok_or_else(|| EndpointError::invalid_format(input, "missing closing bracket"))?;
            let address: Ipv6Addr = address
                .parse()
                .map_err(|_| EndpointError::invalid_format(input, "invalid IPv6 address"))?;
            let port = match tail {
                "" => None,
                tail => {
                    let port = tail.strip_prefix(':').ok_or_else(|| {
                        EndpointError::invalid_format(input, "unexpected text after bracket")
                    })?;
                    Some(literal_port(port)?)
                }
            };
            return Ok(Endpoint::Ipv6(IpEndpoint::new(address, port)));
        }

        if let Ok(address) = input.parse::<Ipv6Addr>() {
            return Ok(Endpoint::Ipv6(address.into()));
        }

        let (host, service) = match input.rsplit_once(':') {
            Some((host, service)) => (host, Some(service)),
            None => (input, None),
        };

        if host.contains(':') {
            return Err(EndpointError::invalid_format(
                input,
                "IPv6 addresses with a port must be bracketed",
            ));
        }
        if service == Some("") {
            return Err(EndpointError::invalid_format(input, "empty service"));
        }

        if let Ok(address) = host.parse::<Ipv4Addr>() {
            let port = service.map(literal_port).transpose()?;
            return Ok(Endpoint::Ipv4(IpEndpoint::new(address, port)));
        }

        HostnameEndpoint::new(host, service.map(str::to_string)).map(Endpoint::Hostname)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Ipv4(ep) => match ep.port() {
                Some(port) => write!(f, "{}:{}", ep.address(), port),
                None => write!(f, "{}", ep.address()),
            },
            Endpoint::Ipv6(ep) => match ep.port() {
                Some(port) => write!(f, "[{}]:{}", ep.address(), port),
                None => write!(f, "{}", ep.address()),
            },
            Endpoint::Hostname(ep) => match ep.service() {
                Some(service) => write!(f, "{}:{}", ep.hostname(), service),
                None => write!(f, "{}", ep.hostname()),
            },
        }
    }
}

impl Serialize for Endpoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = self.to_string();
        if let Endpoint::Hostname(_) = self {
            if let Err(e) = text.parse::<Endpoint>() {
                return Err(ser::Error::custom(format!(
                    "endpoint `{}` cannot be written as text: {}",
                    text, e
                )));
            }
        }
        serializer.serialize_str(&text)
    }
}

impl<'de> Deserialize<'de> for Endpoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
