//! HTTP layer translating requests into service calls.
//!
//! - [`dto`] - Request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing and response headers
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
