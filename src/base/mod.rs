//! Base types and error handling.
//!
//! - [`NetError`](neterror::NetError): resolver-level error codes
//! - [`IoResultExt`](context::IoResultExt): IO error context helpers

pub mod context;
pub mod neterror;
