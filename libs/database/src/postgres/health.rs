use sqlx::PgPool;
use std::time::Instant;
use tracing::debug;

use crate::common::DatabaseError;

/// Run `SELECT 1` on a pooled connection.
pub async fn check_health(pool: &PgPool) -> Result<(), DatabaseError> {
    debug!("Running PostgreSQL health check");

    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(format!("PostgreSQL health check failed: {}", e)))?;

    debug!("PostgreSQL health check passed");
    Ok(())
}

/// Outcome of [`check_health_detailed`]
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    pub message: Option<String>,
    pub response_time_ms: u64,
}

impl HealthStatus {
    pub fn healthy(response_time_ms: u64) -> Self {
        Self {
            healthy: true,
            message: None,
            response_time_ms,
        }
    }

    pub fn unhealthy(message: String, response_time_ms: u64) -> Self {
        Self {
            healthy: false,
            message: Some(message),
            response_time_ms,
        }
    }
}

/// [`check_health`] plus the round-trip time, never failing.
pub async fn check_health_detailed(pool: &PgPool) -> HealthStatus {
    let start = Instant::now();
    let result = check_health(pool).await;
    let elapsed = start.elapsed().as_millis() as u64;

    match result {
        Ok(()) => HealthStatus::healthy(elapsed),
        Err(e) => HealthStatus::unhealthy(e.to_string(), elapsed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_constructors() {
        let ok = HealthStatus::healthy(3);
        assert!(ok.healthy);
        assert!(ok.message.is_none());

        let bad = HealthStatus::unhealthy("pool timed out".to_string(), 8000);
        assert!(!bad.healthy);
        assert_eq!(bad.message.as_deref(), Some("pool timed out"));
        assert_eq!(bad.response_time_ms, 8000);
    }

    #[tokio::test]
    async fn test_check_health_detailed_reports_unreachable_server() {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(std::time::Duration::from_millis(200))
            .connect_lazy("postgresql://postgres@127.0.0.1:1/todo")
            .unwrap();

        let status = check_health_detailed(&pool).await;
        assert!(!status.healthy);
        assert!(status.message.unwrap().contains("health check failed"));
    }
}
