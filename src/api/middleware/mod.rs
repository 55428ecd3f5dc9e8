//! HTTP middleware.

pub mod server_header;
pub mod tracing;
