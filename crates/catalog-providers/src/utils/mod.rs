//! Provider Utilities
//!
//! Shared helpers used by provider implementations.

mod http_response;

pub use http_response::HttpResponseUtils;
