use crate::base::neterror::NetError;
use thiserror::Error;

/// Errors produced while building or resolving an [`Endpoint`](super::Endpoint).
#[derive(Debug, Error, Clone)]
pub enum EndpointError {
    /// The service used as a port fallback is not a valid port number.
    #[error("Invalid service format: `{service}` is not a port number")]
    InvalidServiceFormat { service: String },

    /// The resolver failed to look the hostname up.
    #[error("Resolution failed: {0}")]
    ResolutionFailed(#[from] NetError),

    /// A hostname endpoint was built with an empty hostname.
    #[error("Hostname must not be empty")]
    EmptyHostname,

    /// Endpoint text could not be parsed.
    #[error("Invalid endpoint `{input}`: {reason}")]
    InvalidFormat { input: String, reason: &'static str },
}

impl EndpointError {
    pub(crate) fn invalid_service(service: &str) -> Self {
        EndpointError::InvalidServiceFormat {
            service: service.to_string(),
        }
    }

    pub(crate) fn invalid_format(input: &str, reason: &'static str) -> Self {
        EndpointError::InvalidFormat {
            input: input.to_string(),
            reason,
        }
    }
}
