//! # peerlink
//!
//! Peer addressing for peer-to-peer virtual private networks.
//!
//! `peerlink` names remote peers and turns those names into transport
//! endpoints. A peer is given as a literal IPv4 address, a literal IPv6
//! address, or a hostname. All three resolve through one contract, either
//! synchronously or through a completion callback.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use peerlink::config::ResolveOptions;
//! use peerlink::dns::GaiResolver;
//! use peerlink::endpoint::Endpoint;
//!
//! let peer: Endpoint = "hub.example.com:openvpn".parse()?;
//! let addr = peer.resolve_with(&GaiResolver::new(), &ResolveOptions::default())?;
//! println!("Contacting {}", addr);
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error codes and error context helpers
//! - [`config`] - Resolution options and peer configuration files
//! - [`dns`] - The resolver capability and its system/hickory implementations
//! - [`endpoint`] - Peer endpoints and their resolution contract

pub mod base;
pub mod config;
pub mod dns;
pub mod endpoint;
