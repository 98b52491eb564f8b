//! Service name to port resolution.

use super::query::ResolveFlags;
use crate::base::neterror::NetError;

/// Well-known UDP services recognised by name.
const WELL_KNOWN_SERVICES: &[(&str, u16)] = &[
    ("domain", 53),
    ("bootps", 67),
    ("bootpc", 68),
    ("ntp", 123),
    ("snmp", 161),
    ("https", 443),
    ("isakmp", 500),
    ("syslog", 514),
    ("openvpn", 1194),
    ("l2tp", 1701),
    ("ipsec-nat-t", 4500),
];

/// Parses a numeric service string as a port.
///
/// Only plain ASCII digits in `0..=65535` are accepted; signs, whitespace and
/// out-of-range values yield `None`.
pub fn parse_port(service: &str) -> Option<u16> {
    if service.is_empty() || !service.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    service.parse().ok()
}

/// Looks up a named service in the well-known table.
pub fn lookup_service(name: &str) -> Option<u16> {
    WELL_KNOWN_SERVICES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|(_, port)| *port)
}

/// Resolves a service (numeric or named) to a port.
pub fn resolve_service(service: &str, flags: ResolveFlags) -> Result<u16, NetError> {
    if let Some(port) = parse_port(service) {
        return Ok(port);
    }

    let not_found = || NetError::ServiceNotFound {
        service: service.to_string(),
    };

    if flags.contains(ResolveFlags::NUMERIC_SERVICE) {
        return Err(not_found());
    }

    lookup_service(service).ok_or_else(not_found)
}
