#![allow(dead_code)]

use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;
use tinylink::config::Config;
use tinylink::infrastructure::persistence::{PoolMetrics, SqliteShortenedUrlRepository};
use tinylink::prelude::*;

pub fn create_repository(pool: SqlitePool) -> SqliteShortenedUrlRepository {
    SqliteShortenedUrlRepository::new(Arc::new(pool), Arc::new(PoolMetrics::default()))
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    let repository = Arc::new(create_repository(pool));
    AppState::new(Arc::new(LinkService::new(repository)))
}

/// Database file removed again when the test is done.
pub struct TempDatabase {
    path: PathBuf,
}

impl TempDatabase {
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("tinylink-{}.db", uuid::Uuid::new_v4()));
        Self { path }
    }

    /// Config pointing at this file, with the given pool size and idle timeout.
    pub fn config(&self, max_connections: u32, idle_timeout_secs: u64) -> Config {
        Config {
            database_url: format!("sqlite://{}", self.path.display()),
            listen_addr: "127.0.0.1:0".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            db_max_connections: max_connections,
            db_connect_timeout: 5,
            db_idle_timeout: idle_timeout_secs,
            db_max_lifetime: 1800,
            db_query_timeout: 5,
            health_probe_timeout_ms: 1000,
        }
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

pub async fn insert_link(pool: &SqlitePool, short_url: &str, original_url: &str) -> i64 {
    sqlx::query(
        "INSERT INTO shortened_urls (short_url, original_url, created_at) VALUES (?, ?, datetime('now'))",
    )
    .bind(short_url)
    .bind(original_url)
    .execute(pool)
    .await
    .unwrap()
    .last_insert_rowid()
}

pub async fn count_links(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM shortened_urls")
        .fetch_one(pool)
        .await
        .unwrap()
}
