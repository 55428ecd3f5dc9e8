//! Application layer services.
//!
//! Services consume repository traits and provide a small API for HTTP
//! handlers and the admin CLI.
//!
//! - [`services::link_service::LinkService`] - Short link creation, resolution and health

pub mod services;
