//! Peer configuration.
//!
//! [`ResolveOptions`] carries the inputs every endpoint resolution needs;
//! [`PeerConfig`] is the JSON document a node loads at startup.

use crate::dns::{Protocol, ResolveFlags, Resolve};
use crate::endpoint::{Endpoint, EndpointError, IpEndpoint};
use serde::{Deserialize, Serialize};
use std::{
    io,
    net::{Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Port used when neither an endpoint nor the configuration names one.
pub const DEFAULT_SERVICE: &str = "12000";

/// Inputs for endpoint resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Address family to ask the resolver for
    pub protocol: Protocol,
    /// Resolver hint flags
    pub flags: ResolveFlags,
    /// Service used when an endpoint carries no port or service
    pub default_service: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            protocol: Protocol::Unspecified,
            flags: ResolveFlags::default(),
            default_service: DEFAULT_SERVICE.to_string(),
        }
    }
}

impl ResolveOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the protocol.
    pub fn protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Set resolver flags.
    pub fn flags(mut self, flags: ResolveFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the default service.
    pub fn default_service(mut self, service: impl Into<String>) -> Self {
        self.default_service = service.into();
        self
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

fn default_listen_on() -> Endpoint {
    Endpoint::Ipv4(IpEndpoint::new(Ipv4Addr::UNSPECIFIED, None))
}

/// Node configuration: where to listen and which peers to contact.
///
/// ```json
/// {
///   "listen_on": "0.0.0.0:12000",
///   "contacts": ["192.0.2.1", "[2001:db8::7]:4500", "hub.example.com:openvpn"],
///   "resolve": { "protocol": "v4", "flags": ["v4_mapped"], "default_service": "12000" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerConfig {
    #[serde(default = "default_listen_on")]
    pub listen_on: Endpoint,
    #[serde(default)]
    pub contacts: Vec<Endpoint>,
    #[serde(default)]
    pub resolve: ResolveOptions,
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self {
            listen_on: default_listen_on(),
            contacts: Vec::new(),
            resolve: ResolveOptions::default(),
        }
    }
}

impl PeerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading peer configuration");
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolves the listen endpoint with this configuration's options.
    pub fn resolve_listen_on<R: Resolve + ?Sized>(
        &self,
        resolver: &R,
    ) -> Result<SocketAddr, EndpointError> {
        self.listen_on.resolve_with(resolver, &self.resolve)
    }

    /// Resolves every contact, in order. One failing contact does not stop the others.
    pub fn resolve_contacts<R: Resolve + ?Sized>(
        &self,
        resolver: &R,
    ) -> Vec<Result<SocketAddr, EndpointError>> {
        self.contacts
            .iter()
            .map(|contact| {
                contact.resolve_with(resolver, &self.resolve).map_err(|e| {
                    tracing::debug!(contact = %contact, error = %e, "contact resolution failed");
                    e
                })
            })
            .collect()
    }
}
