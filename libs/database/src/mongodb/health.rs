use mongodb::{Client, bson::doc};
use std::time::Instant;

use crate::common::{DatabaseError, DatabaseResult};

/// Outcome of a timed liveness probe
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    /// Failure details when unhealthy
    pub message: Option<String>,
    pub response_time_ms: u64,
}

/// Send `{ ping: 1 }` to the admin database.
pub async fn ping(client: &Client) -> DatabaseResult<()> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))
}

pub async fn check_health(client: &Client) -> bool {
    ping(client).await.is_ok()
}

/// Like [`check_health`], with latency and the error message.
pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let start = Instant::now();
    let result = ping(client).await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(()) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms,
        },
        Err(e) => {
            tracing::warn!(error = %e, "MongoDB health check failed");
            HealthStatus {
                healthy: false,
                message: Some(e.to_string()),
                response_time_ms,
            }
        }
    }
}
