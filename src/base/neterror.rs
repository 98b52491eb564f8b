use std::{io, sync::Arc};
use thiserror::Error;

/// Errors reported by the resolver layer.
///
/// Every variant maps to a stable Chromium-style numeric code (see
/// [`NetError::as_i32`]), which resolvers attach to their failure logs.
#[derive(Debug, Error, Clone)]
pub enum NetError {
    #[error("Address invalid")]
    AddressInvalid,
    #[error("No async runtime available to drive the lookup")]
    NoRuntime,
    #[error("Resolver task failed")]
    ResolverTaskFailed,

    #[error("Name not resolved: {domain}: {source}")]
    NameNotResolvedFor {
        domain: String,
        #[source]
        source: Arc<io::Error>,
    },
    #[error("Service not found: {service}")]
    ServiceNotFound { service: String },
}

impl NetError {
    /// Build a [`NetError::NameNotResolvedFor`] from an IO error.
    pub fn dns_failed(domain: &str, source: io::Error) -> Self {
        NetError::NameNotResolvedFor {
            domain: domain.to_string(),
            source: Arc::new(source),
        }
    }

    /// Lookup yielded nothing usable for `domain`.
    pub fn no_addresses(domain: &str, reason: &str) -> Self {
        Self::dns_failed(domain, io::Error::new(io::ErrorKind::NotFound, reason.to_string()))
    }

    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::AddressInvalid => -108,

            // Custom codes, kept clear of the Chromium-assigned ranges.
            NetError::NoRuntime => -10001,
            NetError::ResolverTaskFailed => -10002,

            NetError::NameNotResolvedFor { .. } => -105,
            NetError::ServiceNotFound { .. } => -137,
        }
    }
}
