//! Link creation and resolution service.

use std::sync::Arc;

use crate::domain::entities::{DatabaseHealth, NewShortenedUrl, ShortenedUrl};
use crate::domain::repositories::ShortenedUrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;

/// Service for creating and resolving shortened links.
///
/// Thin by intent: URLs are stored verbatim, tokens are not deduplicated and
/// the same long URL shortened twice gets two tokens.
pub struct LinkService<R: ShortenedUrlRepository> {
    repository: Arc<R>,
}

impl<R: ShortenedUrlRepository> LinkService<R> {
    /// Creates a new link service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Stores `original_url` under a freshly generated token.
    ///
    /// # Errors
    ///
    /// Propagates storage failures from the repository unchanged.
    pub async fn create_short_url(&self, original_url: String) -> Result<ShortenedUrl, AppError> {
        let new_url = NewShortenedUrl::now(generate_code(), original_url);
        let created = self.repository.create(new_url).await?;

        tracing::debug!(id = created.id, short_url = %created.short_url, "Created short URL");

        Ok(created)
    }

    /// Returns the original URL stored for `short_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no row matches.
    /// Returns [`AppError::Storage`] or [`AppError::Timeout`] on database errors.
    pub async fn resolve(&self, short_url: &str) -> Result<String, AppError> {
        self.repository
            .find_original_url(short_url)
            .await?
            .ok_or_else(|| {
                tracing::debug!(short_url, "No rows were returned");
                AppError::not_found(format!("No URL stored for '{}'", short_url))
            })
    }

    /// Reports database reachability and pool counters.
    pub async fn health(&self) -> DatabaseHealth {
        self.repository.health().await
    }

    /// Releases the underlying store.
    pub async fn close(&self) {
        self.repository.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PoolStats;
    use crate::domain::repositories::MockShortenedUrlRepository;

    #[tokio::test]
    async fn test_create_short_url_success() {
        let mut mock_repo = MockShortenedUrlRepository::new();

        mock_repo
            .expect_create()
            .withf(|new_url| {
                new_url.original_url == "https://example.com" && new_url.short_url.len() == 8
            })
            .times(1)
            .returning(|new_url| Ok(new_url.into_stored(1)));

        let service = LinkService::new(Arc::new(mock_repo));

        let created = service
            .create_short_url("https://example.com".to_string())
            .await
            .unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.original_url, "https://example.com");
        assert_eq!(created.short_url.len(), 8);
    }

    #[tokio::test]
    async fn test_create_short_url_accepts_anything() {
        let mut mock_repo = MockShortenedUrlRepository::new();

        mock_repo
            .expect_create()
            .withf(|new_url| new_url.original_url.is_empty())
            .times(1)
            .returning(|new_url| Ok(new_url.into_stored(2)));

        let service = LinkService::new(Arc::new(mock_repo));

        assert!(service.create_short_url(String::new()).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_short_url_twice_gives_distinct_tokens() {
        let mut mock_repo = MockShortenedUrlRepository::new();

        let mut next_id = 0;
        mock_repo.expect_create().times(2).returning(move |new_url| {
            next_id += 1;
            Ok(new_url.into_stored(next_id))
        });

        let service = LinkService::new(Arc::new(mock_repo));

        let first = service
            .create_short_url("https://example.com".to_string())
            .await
            .unwrap();
        let second = service
            .create_short_url("https://example.com".to_string())
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_ne!(first.short_url, second.short_url);
    }

    #[tokio::test]
    async fn test_create_short_url_propagates_storage_error() {
        let mut mock_repo = MockShortenedUrlRepository::new();

        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::Storage(sqlx::Error::PoolTimedOut)));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service
            .create_short_url("https://example.com".to_string())
            .await;

        assert!(matches!(
            result,
            Err(AppError::Storage(sqlx::Error::PoolTimedOut))
        ));
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let mut mock_repo = MockShortenedUrlRepository::new();

        mock_repo
            .expect_find_original_url()
            .withf(|short_url| short_url == "abc12345")
            .times(1)
            .returning(|_| Ok(Some("https://example.com/target".to_string())));

        let service = LinkService::new(Arc::new(mock_repo));

        let url = service.resolve("abc12345").await.unwrap();
        assert_eq!(url, "https://example.com/target");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut mock_repo = MockShortenedUrlRepository::new();

        mock_repo
            .expect_find_original_url()
            .times(1)
            .returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.resolve("missing0").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_storage_error_is_not_a_miss() {
        let mut mock_repo = MockShortenedUrlRepository::new();

        mock_repo
            .expect_find_original_url()
            .times(1)
            .returning(|_| Err(AppError::Storage(sqlx::Error::PoolClosed)));

        let service = LinkService::new(Arc::new(mock_repo));

        let err = service.resolve("abc12345").await.unwrap_err();
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_health_passes_through() {
        let mut mock_repo = MockShortenedUrlRepository::new();

        mock_repo
            .expect_health()
            .times(1)
            .returning(|| DatabaseHealth::from_stats(PoolStats::default()));

        let service = LinkService::new(Arc::new(mock_repo));

        assert!(service.health().await.is_up());
    }
}
