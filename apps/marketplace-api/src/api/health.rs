//! Health check endpoints

use axum::{Router, extract::State, response::Response, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::mongodb::check_health_detailed;

use crate::state::AppState;

/// Create a health check router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check - verifies MongoDB connection
async fn readiness_check(State(state): State<AppState>) -> Response {
    let mongodb: HealthCheckFuture<'_> = Box::pin(async {
        let status = check_health_detailed(&state.mongo_client).await;
        if status.healthy {
            Ok(())
        } else {
            Err(status
                .message
                .unwrap_or_else(|| "MongoDB ping failed".to_string()))
        }
    });

    run_health_checks(vec![("mongodb", mongodb)]).await
}
