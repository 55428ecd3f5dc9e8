//! SQLite pool construction and cumulative pool counters.
//!
//! sqlx reports only the current pool size and idle count. Wait events and
//! connection retirements are counted here: the pool's own reaper is turned
//! off and connections are retired in the `before_acquire` hook instead, so
//! every retirement passes through [`PoolMetrics::admit`].

use sqlx::SqlitePool;
use sqlx::pool::PoolConnectionMetadata;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::config::Config;
use crate::domain::entities::PoolStats;

/// Cumulative counters shared by the pool hooks and the repository.
#[derive(Debug, Default)]
pub struct PoolMetrics {
    wait_count: AtomicU64,
    wait_duration_nanos: AtomicU64,
    max_idle_closed: AtomicU64,
    max_lifetime_closed: AtomicU64,
    idle_timeout: Option<Duration>,
    max_lifetime: Option<Duration>,
}

impl PoolMetrics {
    /// Creates counters that retire connections past the given limits.
    pub fn new(idle_timeout: Option<Duration>, max_lifetime: Option<Duration>) -> Self {
        Self {
            idle_timeout,
            max_lifetime,
            ..Default::default()
        }
    }

    /// Records one acquisition that had to wait for a free connection.
    pub fn record_wait(&self, waited: Duration) {
        let nanos = u64::try_from(waited.as_nanos()).unwrap_or(u64::MAX);
        self.wait_count.fetch_add(1, Ordering::Relaxed);
        self.wait_duration_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    /// Decides whether a pooled connection may be handed out.
    ///
    /// Lifetime is checked before idleness; a rejected connection is closed
    /// by the pool and counted under the matching reason.
    pub fn admit(&self, age: Duration, idle_for: Duration) -> bool {
        if self.max_lifetime.is_some_and(|limit| age >= limit) {
            self.max_lifetime_closed.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        if self.idle_timeout.is_some_and(|limit| idle_for >= limit) {
            self.max_idle_closed.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        true
    }

    /// Combines the counters with the pool's live gauges.
    pub fn snapshot(&self, pool: &SqlitePool) -> PoolStats {
        let open_connections = pool.size();
        let idle = u32::try_from(pool.num_idle()).unwrap_or(u32::MAX);

        PoolStats {
            open_connections,
            in_use: open_connections.saturating_sub(idle),
            idle,
            wait_count: self.wait_count.load(Ordering::Relaxed),
            wait_duration: Duration::from_nanos(self.wait_duration_nanos.load(Ordering::Relaxed)),
            max_idle_closed: self.max_idle_closed.load(Ordering::Relaxed),
            max_lifetime_closed: self.max_lifetime_closed.load(Ordering::Relaxed),
        }
    }
}

/// Opens the SQLite pool described by `config`.
///
/// The database file is created if it does not exist.
///
/// # Errors
///
/// Returns an error if the URL is malformed or the first connection fails.
pub async fn connect(config: &Config) -> Result<(SqlitePool, Arc<PoolMetrics>), sqlx::Error> {
    let metrics = Arc::new(PoolMetrics::new(
        config.idle_timeout(),
        config.max_lifetime(),
    ));
    let hook_metrics = metrics.clone();

    let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.connect_timeout())
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .before_acquire(move |_conn, meta: PoolConnectionMetadata| {
            let keep = hook_metrics.admit(meta.age, meta.idle_for);
            Box::pin(async move { Ok(keep) })
        })
        .connect_with(options)
        .await?;

    tracing::info!(
        max_connections = config.db_max_connections,
        "Connected to database"
    );

    Ok((pool, metrics))
}
