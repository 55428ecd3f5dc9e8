//! Stamps every response with a `server` header naming the service.

use axum::http::{HeaderValue, header};
use tower_http::set_header::SetResponseHeaderLayer;

/// Header value sent on every response.
pub const SERVER_NAME: &str = env!("CARGO_PKG_NAME");

/// Creates the layer; a `server` header set by a handler is kept.
pub fn layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(header::SERVER, HeaderValue::from_static(SERVER_NAME))
}
