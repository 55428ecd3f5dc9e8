//! # tinylink
//!
//! A small URL shortening service built with Axum and SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities and the storage trait
//! - **Application Layer** ([`application`]) - Token generation and lookups
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite pool and repository
//! - **API Layer** ([`api`]) - Handlers, DTOs and middleware
//!
//! ## Endpoints
//!
//! - `POST /shorten` with `{"url": "..."}` returns `{"shortened": "<token>"}`
//! - `GET /{token}` answers 301 to the stored URL
//! - `GET /health` reports database status and pool counters
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://./tinylink.db"
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
pub mod prelude {
    pub use crate::application::services::LinkService;
    pub use crate::domain::entities::{DatabaseHealth, NewShortenedUrl, PoolStats, ShortenedUrl};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
