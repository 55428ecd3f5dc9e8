//! Repository trait for shortened URL storage.

use crate::domain::entities::{DatabaseHealth, NewShortenedUrl, ShortenedUrl};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage interface for token → URL mappings.
///
/// One instance is built at startup and shared by every request.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteShortenedUrlRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortenedUrlRepository: Send + Sync {
    /// Inserts a mapping and returns it with the store-assigned id.
    ///
    /// No uniqueness check is made on the token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the insert fails and
    /// [`AppError::Timeout`] if it does not finish in time.
    async fn create(&self, new_url: NewShortenedUrl) -> Result<ShortenedUrl, AppError>;

    /// Finds the original URL stored for a token.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if found (lowest id wins on duplicate tokens)
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] or [`AppError::Timeout`] on database failures.
    async fn find_original_url(&self, short_url: &str) -> Result<Option<String>, AppError>;

    /// Probes the database and reports pool counters.
    ///
    /// A failed probe yields [`DatabaseHealth::Down`]; it never aborts the process.
    async fn health(&self) -> DatabaseHealth;

    /// Releases all pooled connections.
    async fn close(&self);
}
