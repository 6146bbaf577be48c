use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::scoreboard::{MatchUpdateRequest, MatchView, PenaltyRequest, StatusResponse},
    error::AppError,
    services::scoreboard_service,
    state::ScoreboardState,
};

/// Match state, timer and penalty endpoints polled by the admin panel and overlays.
pub fn router() -> Router<ScoreboardState> {
    Router::new()
        .route("/api/match", get(get_match))
        .route("/api/update", post(update_match))
        .route("/api/penalties", post(add_penalty).delete(clear_penalties))
}

/// Return the match with penalties and the server-computed elapsed time.
#[utoipa::path(
    get,
    path = "/api/match",
    tag = "scoreboard",
    responses(
        (status = 200, description = "Current match", body = MatchView),
        (status = 503, description = "Database unavailable")
    )
)]
pub async fn get_match(State(state): State<ScoreboardState>) -> Result<Json<MatchView>, AppError> {
    Ok(Json(scoreboard_service::get_state(&state).await?))
}

/// Apply a timer command and/or any subset of the display fields.
#[utoipa::path(
    post,
    path = "/api/update",
    tag = "scoreboard",
    request_body = MatchUpdateRequest,
    responses(
        (status = 200, description = "Update applied", body = StatusResponse),
        (status = 422, description = "Unknown action or malformed field")
    )
)]
pub async fn update_match(
    State(state): State<ScoreboardState>,
    Json(payload): Json<MatchUpdateRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    Ok(Json(scoreboard_service::apply_update(&state, payload).await?))
}

/// Record one penalty attempt.
#[utoipa::path(
    post,
    path = "/api/penalties",
    tag = "scoreboard",
    request_body = PenaltyRequest,
    responses((status = 200, description = "Penalty recorded", body = StatusResponse))
)]
pub async fn add_penalty(
    State(state): State<ScoreboardState>,
    Json(payload): Json<PenaltyRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    Ok(Json(scoreboard_service::add_penalty(&state, payload).await?))
}

/// Clear the shootout list.
#[utoipa::path(
    delete,
    path = "/api/penalties",
    tag = "scoreboard",
    responses((status = 200, description = "Penalties cleared", body = StatusResponse))
)]
pub async fn clear_penalties(
    State(state): State<ScoreboardState>,
) -> Result<Json<StatusResponse>, AppError> {
    Ok(Json(scoreboard_service::clear_penalties(&state).await?))
}
