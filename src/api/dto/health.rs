//! DTOs for health check endpoint.

use serde::Serialize;

use crate::domain::entities::{DatabaseHealth, PoolStats};

/// Health check response.
///
/// An `up` response carries a message and the pool counters; a `down`
/// response carries only the error.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(flatten)]
    pub pool: Option<PoolStatsBody>,
}

/// Pool counters as exposed over HTTP.
#[derive(Debug, Serialize)]
pub struct PoolStatsBody {
    pub open_connections: u32,
    pub in_use: u32,
    pub idle: u32,
    pub wait_count: u64,
    /// Human-readable, e.g. `"0ns"` or `"12.5ms"`.
    pub wait_duration: String,
    pub max_idle_closed: u64,
    pub max_lifetime_closed: u64,
}

impl From<PoolStats> for PoolStatsBody {
    fn from(stats: PoolStats) -> Self {
        Self {
            open_connections: stats.open_connections,
            in_use: stats.in_use,
            idle: stats.idle,
            wait_count: stats.wait_count,
            wait_duration: format!("{:?}", stats.wait_duration),
            max_idle_closed: stats.max_idle_closed,
            max_lifetime_closed: stats.max_lifetime_closed,
        }
    }
}

impl From<DatabaseHealth> for HealthResponse {
    fn from(health: DatabaseHealth) -> Self {
        let status = health.status();

        match health {
            DatabaseHealth::Up { stats, message } => Self {
                status,
                message: Some(message),
                error: None,
                pool: Some(stats.into()),
            },
            DatabaseHealth::Down { error } => Self {
                status,
                message: None,
                error: Some(error),
                pool: None,
            },
        }
    }
}
