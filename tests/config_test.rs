//! Config Module Tests
//!
//! Covers:
//! - `ResolveOptions` defaults and builder
//! - `PeerConfig` JSON loading (string and file)
//! - Resolving configured endpoints

use peerlink::config::{ConfigError, PeerConfig, ResolveOptions, DEFAULT_SERVICE};
use peerlink::dns::{DnsResolverWithOverrides, GaiResolver, Protocol, ResolveFlags};
use peerlink::endpoint::{Endpoint, EndpointError};

use std::borrow::Cow;
use std::collections::HashMap;
use std::io::Write;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

const SAMPLE: &str = r#"{
    "listen_on": "0.0.0.0:12000",
    "contacts": ["192.0.2.1", "[2001:db8::7]:4500", "hub.vpn:openvpn", "198.51.100.3"],
    "resolve": { "protocol": "unspecified", "flags": ["address_configured"], "default_service": "12001" }
}"#;

#[test]
fn test_resolve_options_defaults() {
    let options = ResolveOptions::default();
    assert_eq!(options.protocol, Protocol::Unspecified);
    assert_eq!(options.flags, ResolveFlags::default());
    assert_eq!(options.default_service, DEFAULT_SERVICE);
}

#[test]
fn test_parse_sample() {
    let config = PeerConfig::from_json_str(SAMPLE).unwrap();

    assert_eq!(config.listen_on.to_string(), "0.0.0.0:12000");
    assert_eq!(config.contacts.len(), 4);
    assert!(matches!(config.contacts[1], Endpoint::Ipv6(_)));
    assert!(matches!(config.contacts[2], Endpoint::Hostname(_)));
    assert_eq!(config.resolve.default_service, "12001");
}

#[test]
fn test_partial_resolve_section() {
    let config = PeerConfig::from_json_str(r#"{ "resolve": { "protocol": "v6" } }"#).unwrap();
    assert_eq!(config.resolve.protocol, Protocol::V6);
    assert_eq!(config.resolve.default_service, DEFAULT_SERVICE);
    assert!(config.contacts.is_empty());
}

#[test]
fn test_invalid_documents() {
    let bad_endpoint = PeerConfig::from_json_str(r#"{ "contacts": ["192.0.2.1:http"] }"#);
    assert!(matches!(bad_endpoint, Err(ConfigError::Json(_))));

    let bad_flag = PeerConfig::from_json_str(r#"{ "resolve": { "flags": ["fast"] } }"#);
    assert!(matches!(bad_flag, Err(ConfigError::Json(_))));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();

    let config = PeerConfig::from_file(file.path()).unwrap();
    assert_eq!(config, PeerConfig::from_json_str(SAMPLE).unwrap());
}

#[test]
fn test_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");

    match PeerConfig::from_file(&path) {
        Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected Io error, got {:?}", other),
    }
}

#[test]
fn test_json_roundtrip() {
    let config = PeerConfig::from_json_str(SAMPLE).unwrap();
    let json = config.to_json_string().unwrap();
    assert_eq!(PeerConfig::from_json_str(&json).unwrap(), config);
}

#[test]
fn test_written_config_always_reloads() {
    let config = PeerConfig {
        contacts: vec![
            Endpoint::hostname("hub.example.com", Some("openvpn".into())).unwrap(),
            Endpoint::hostname("198.51.100.3", Some("4500".into())).unwrap(),
        ],
        ..PeerConfig::default()
    };
    let reloaded = PeerConfig::from_json_str(&config.to_json_string().unwrap()).unwrap();
    assert_eq!(reloaded.contacts[0], config.contacts[0]);
    assert_eq!(reloaded.contacts[1].to_string(), "198.51.100.3:4500");

    assert!(matches!(
        Endpoint::hostname("hub.example.com", Some("a:b".into())),
        Err(EndpointError::InvalidFormat { .. })
    ));

    let unwritable = PeerConfig {
        contacts: vec![Endpoint::hostname("198.51.100.3", Some("openvpn".into())).unwrap()],
        ..PeerConfig::default()
    };
    assert!(matches!(unwritable.to_json_string(), Err(ConfigError::Json(_))));
}

#[test]
fn test_resolve_configured_endpoints() {
    let mut overrides = HashMap::new();
    overrides.insert(Cow::Borrowed("hub.vpn"), vec![IpAddr::V4(Ipv4Addr::new(10, 8, 0, 1))]);
    let resolver = DnsResolverWithOverrides::new(Arc::new(GaiResolver::new()), overrides);

    let config = PeerConfig::from_json_str(SAMPLE).unwrap();
    assert_eq!(
        config.resolve_listen_on(&resolver).unwrap(),
        "0.0.0.0:12000".parse::<SocketAddr>().unwrap()
    );

    let contacts: Vec<SocketAddr> = config
        .resolve_contacts(&resolver)
        .into_iter()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        contacts,
        vec![
            "192.0.2.1:12001".parse::<SocketAddr>().unwrap(),
            "[2001:db8::7]:4500".parse().unwrap(),
            "10.8.0.1:1194".parse().unwrap(),
            "198.51.100.3:12001".parse().unwrap(),
        ]
    );
}

#[test]
fn test_resolve_contacts_reports_each_failure() {
    let config = PeerConfig {
        contacts: vec!["192.0.2.1".parse().unwrap(), "192.0.2.2:7".parse().unwrap()],
        resolve: ResolveOptions::new().default_service("not-numeric"),
        ..PeerConfig::default()
    };

    let results = config.resolve_contacts(&GaiResolver::new());
    assert!(matches!(results[0], Err(EndpointError::InvalidServiceFormat { .. })));
    assert_eq!(results[1].as_ref().unwrap(), &"192.0.2.2:7".parse::<SocketAddr>().unwrap());
}
