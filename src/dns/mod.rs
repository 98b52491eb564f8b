//! DNS Resolution Module
//!
//! Provides the pluggable resolver capability that hostname endpoints
//! delegate to:
//! - System resolver (getaddrinfo, direct or via thread pool)
//! - Async hickory-dns resolver (DoH/DoT capable)
//! - Hostname-to-IP override mechanism
//!
//! # Architecture
//!
//! The `Resolve` trait is the core abstraction. A lookup is described by a
//! [`Query`] (host, service, protocol, flags) and answered with an ordered
//! [`ResolverResults`] sequence, either as a future, by blocking, or through
//! a completion handler.
//!
//! # Example
//!
//! ```rust,ignore
//! use peerlink::dns::{GaiResolver, Protocol, Query, Resolve, ResolveFlags};
//!
//! let resolver = GaiResolver::new();
//! let query = Query::new("vpn.example.com", "12000", Protocol::V4, ResolveFlags::default());
//! for entry in resolver.resolve(query).await? {
//!     println!("Resolved: {}", entry.endpoint());
//! }
//! ```

mod gai;
mod hickory;
mod query;
mod resolve;
mod results;
pub mod service;

pub use gai::GaiResolver;
pub use hickory::HickoryResolver;
pub use query::{Protocol, Query, ResolveFlags};
pub use resolve::{
    CompletionGuard, DnsResolverWithOverrides, Name, Resolve, ResolveHandler, Resolving,
};
pub use results::{ResolverEntry, ResolverResults};
