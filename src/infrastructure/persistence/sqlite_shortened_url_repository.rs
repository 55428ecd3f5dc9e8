//! SQLite implementation of the shortened URL repository.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{Connection, Sqlite, SqlitePool};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::pool::PoolMetrics;
use crate::domain::entities::{DatabaseHealth, NewShortenedUrl, ShortenedUrl};
use crate::domain::repositories::ShortenedUrlRepository;
use crate::error::AppError;

const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// SQLite repository for token → URL mappings.
///
/// Every statement runs on a connection acquired through [`Self::acquire`]
/// so that waits for a saturated pool show up in the health counters.
pub struct SqliteShortenedUrlRepository {
    pool: Arc<SqlitePool>,
    metrics: Arc<PoolMetrics>,
    query_timeout: Duration,
    probe_timeout: Duration,
}

impl SqliteShortenedUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>, metrics: Arc<PoolMetrics>) -> Self {
        Self {
            pool,
            metrics,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Overrides the per-statement and health probe timeouts.
    pub fn with_timeouts(mut self, query_timeout: Duration, probe_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self.probe_timeout = probe_timeout;
        self
    }

    async fn acquire(&self) -> Result<PoolConnection<Sqlite>, AppError> {
        let max_connections = self.pool.options().get_max_connections();
        let saturated = self.pool.num_idle() == 0 && self.pool.size() >= max_connections;

        let started = Instant::now();
        let conn = self.pool.acquire().await?;

        if saturated {
            self.metrics.record_wait(started.elapsed());
        }

        Ok(conn)
    }

    /// Hands `conn` back and waits, at most the probe timeout, until the pool
    /// has it again.
    ///
    /// sqlx returns a dropped connection from a spawned task, so the pool
    /// gauges lag behind the drop.
    async fn release(&self, conn: PoolConnection<Sqlite>) {
        let idle_before = self.pool.num_idle();
        let size_before = self.pool.size();
        drop(conn);

        let returned = async {
            while self.pool.num_idle() <= idle_before
                && self.pool.size() >= size_before
                && !self.pool.is_closed()
            {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        };

        if tokio::time::timeout(self.probe_timeout, returned).await.is_err() {
            tracing::debug!("Probe connection not yet back in the pool");
        }
    }

    async fn bounded<T>(
        &self,
        operation: impl Future<Output = Result<T, AppError>>,
    ) -> Result<T, AppError> {
        tokio::time::timeout(self.query_timeout, operation)
            .await
            .map_err(|_| AppError::Timeout(self.query_timeout))?
    }
}

#[async_trait]
impl ShortenedUrlRepository for SqliteShortenedUrlRepository {
    async fn create(&self, new_url: NewShortenedUrl) -> Result<ShortenedUrl, AppError> {
        self.bounded(async move {
            let mut conn = self.acquire().await?;

            let result = sqlx::query(
                r#"
                INSERT INTO shortened_urls (short_url, original_url, created_at)
                VALUES (?, ?, ?)
                "#,
            )
            .bind(&new_url.short_url)
            .bind(&new_url.original_url)
            .bind(new_url.created_at)
            .execute(&mut *conn)
            .await?;

            Ok(new_url.into_stored(result.last_insert_rowid()))
        })
        .await
    }

    async fn find_original_url(&self, short_url: &str) -> Result<Option<String>, AppError> {
        self.bounded(async move {
            let mut conn = self.acquire().await?;

            let original_url = sqlx::query_scalar::<_, String>(
                r#"
                SELECT original_url
                FROM shortened_urls
                WHERE short_url = ?
                ORDER BY id
                LIMIT 1
                "#,
            )
            .bind(short_url)
            .fetch_optional(&mut *conn)
            .await?;

            Ok(original_url)
        })
        .await
    }

    async fn health(&self) -> DatabaseHealth {
        let probe = async {
            let mut conn = self.acquire().await?;
            conn.ping().await?;
            Ok::<_, AppError>(conn)
        };

        match tokio::time::timeout(self.probe_timeout, probe).await {
            Ok(Ok(conn)) => {
                self.release(conn).await;
                DatabaseHealth::from_stats(self.metrics.snapshot(&self.pool))
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Database health probe failed");
                DatabaseHealth::down(format!("db down: {}", e))
            }
            Err(_) => {
                tracing::warn!(timeout = ?self.probe_timeout, "Database health probe timed out");
                DatabaseHealth::down(format!(
                    "db down: no response within {:?}",
                    self.probe_timeout
                ))
            }
        }
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Disconnected from database");
    }
}
