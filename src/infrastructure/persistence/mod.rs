//! SQLite persistence.
//!
//! - [`pool`] - Pool construction and cumulative connection counters
//! - [`SqliteShortenedUrlRepository`] - Token → URL storage and health probe

pub mod pool;
pub mod sqlite_shortened_url_repository;

pub use pool::PoolMetrics;
pub use sqlite_shortened_url_repository::SqliteShortenedUrlRepository;
