use tracing::warn;

use crate::{dto::health::HealthResponse, state::HealthState};

/// Ping the panel's database, reporting degraded mode when it cannot be queried.
pub async fn health_status(state: &HealthState) -> HealthResponse {
    match state.store().health_check().await {
        Ok(()) => HealthResponse::ok(),
        Err(err) => {
            warn!(error = %err, "storage health check failed");
            HealthResponse::degraded()
        }
    }
}
