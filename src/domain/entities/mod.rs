//! Core domain entities.
//!
//! - [`ShortenedUrl`] - A stored token → URL mapping
//! - [`NewShortenedUrl`] - Input for inserting a mapping
//! - [`PoolStats`] / [`DatabaseHealth`] - Connection-pool snapshot and the
//!   health verdict derived from it

pub mod database_health;
pub mod shortened_url;

pub use database_health::{DatabaseHealth, PoolStats, assess_pool};
pub use shortened_url::{NewShortenedUrl, ShortenedUrl};
