//! Connection-pool snapshot and the health verdict derived from it.

use std::time::Duration;

pub const HEALTHY_MESSAGE: &str = "It's healthy";
pub const HEAVY_LOAD_MESSAGE: &str = "The database is experiencing heavy load.";
pub const HIGH_WAIT_MESSAGE: &str =
    "The database has a high number of wait events, indicating potential bottlenecks.";
pub const IDLE_CLOSED_MESSAGE: &str =
    "Many idle connections are being closed, consider revising the connection pool settings.";
pub const LIFETIME_CLOSED_MESSAGE: &str = "Many connections are being closed due to max lifetime, consider increasing max lifetime or revising the connection usage pattern.";

const HEAVY_LOAD_OPEN_CONNECTIONS: u32 = 40;
const HIGH_WAIT_COUNT: u64 = 1000;

/// Point-in-time connection-pool counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub open_connections: u32,
    pub in_use: u32,
    pub idle: u32,
    /// Total acquisitions that had to wait for a free connection.
    pub wait_count: u64,
    /// Total time spent waiting in those acquisitions.
    pub wait_duration: Duration,
    /// Connections retired for sitting idle too long.
    pub max_idle_closed: u64,
    /// Connections retired for exceeding their maximum lifetime.
    pub max_lifetime_closed: u64,
}

/// Result of a database health probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseHealth {
    Up {
        stats: PoolStats,
        message: &'static str,
    },
    Down {
        error: String,
    },
}

impl DatabaseHealth {
    /// Builds an `Up` verdict, picking the message from the counters.
    pub fn from_stats(stats: PoolStats) -> Self {
        Self::Up {
            message: assess_pool(&stats),
            stats,
        }
    }

    pub fn down(error: impl Into<String>) -> Self {
        Self::Down {
            error: error.into(),
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, Self::Up { .. })
    }

    pub fn status(&self) -> &'static str {
        match self {
            Self::Up { .. } => "up",
            Self::Down { .. } => "down",
        }
    }
}

/// Chooses the status message for a pool snapshot.
///
/// Every rule is checked against the same snapshot and a later match
/// replaces an earlier one, so the last matching rule decides.
pub fn assess_pool(stats: &PoolStats) -> &'static str {
    let half_open = u64::from(stats.open_connections) / 2;
    let mut message = HEALTHY_MESSAGE;

    if stats.open_connections > HEAVY_LOAD_OPEN_CONNECTIONS {
        message = HEAVY_LOAD_MESSAGE;
    }

    if stats.wait_count > HIGH_WAIT_COUNT {
        message = HIGH_WAIT_MESSAGE;
    }

    if stats.max_idle_closed > half_open {
        message = IDLE_CLOSED_MESSAGE;
    }

    if stats.max_lifetime_closed > half_open {
        message = LIFETIME_CLOSED_MESSAGE;
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_pool_is_healthy() {
        let stats = PoolStats {
            open_connections: 2,
            in_use: 1,
            idle: 1,
            ..Default::default()
        };
        assert_eq!(assess_pool(&stats), HEALTHY_MESSAGE);
    }

    #[test]
    fn test_empty_pool_is_healthy() {
        assert_eq!(assess_pool(&PoolStats::default()), HEALTHY_MESSAGE);
    }

    #[test]
    fn test_heavy_load() {
        let stats = PoolStats {
            open_connections: 50,
            ..Default::default()
        };
        assert_eq!(assess_pool(&stats), HEAVY_LOAD_MESSAGE);
    }

    #[test]
    fn test_heavy_load_threshold_is_exclusive() {
        let stats = PoolStats {
            open_connections: 40,
            ..Default::default()
        };
        assert_eq!(assess_pool(&stats), HEALTHY_MESSAGE);
    }

    #[test]
    fn test_high_wait_count_overrides_heavy_load() {
        let stats = PoolStats {
            open_connections: 50,
            wait_count: 1001,
            ..Default::default()
        };
        assert_eq!(assess_pool(&stats), HIGH_WAIT_MESSAGE);
    }

    #[test]
    fn test_later_rule_wins_over_heavy_load() {
        let stats = PoolStats {
            open_connections: 50,
            max_idle_closed: 30,
            ..Default::default()
        };
        assert_eq!(assess_pool(&stats), IDLE_CLOSED_MESSAGE);
    }

    #[test]
    fn test_idle_closed_uses_integer_half() {
        // 5 / 2 == 2, so 3 closed idle connections trip the rule.
        let stats = PoolStats {
            open_connections: 5,
            max_idle_closed: 3,
            ..Default::default()
        };
        assert_eq!(assess_pool(&stats), IDLE_CLOSED_MESSAGE);

        let stats = PoolStats {
            open_connections: 5,
            max_idle_closed: 2,
            ..Default::default()
        };
        assert_eq!(assess_pool(&stats), HEALTHY_MESSAGE);
    }

    #[test]
    fn test_lifetime_closed_is_last_rule() {
        let stats = PoolStats {
            open_connections: 50,
            wait_count: 5000,
            max_idle_closed: 40,
            max_lifetime_closed: 40,
            ..Default::default()
        };
        assert_eq!(assess_pool(&stats), LIFETIME_CLOSED_MESSAGE);
    }

    #[test]
    fn test_from_stats_and_down() {
        let up = DatabaseHealth::from_stats(PoolStats::default());
        assert!(up.is_up());
        assert_eq!(up.status(), "up");

        let down = DatabaseHealth::down("db down: pool closed");
        assert!(!down.is_up());
        assert_eq!(down.status(), "down");
    }
}
