use axum::{
    Json, Router,
    extract::{FromRef, State},
    routing::get,
};

use crate::{dto::health::HealthResponse, services::health_service, state::HealthState};

#[utoipa::path(
    get,
    path = "/healthcheck",
    tag = "health",
    responses((status = 200, description = "Service is up; status tells whether the database answers", body = HealthResponse))
)]
/// Report whether the panel's database can be queried.
pub async fn healthcheck(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(health_service::health_status(&state).await)
}

/// Health routes, mountable on any panel whose state exposes a [`HealthState`].
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    HealthState: FromRef<S>,
{
    Router::new().route("/healthcheck", get(healthcheck))
}
