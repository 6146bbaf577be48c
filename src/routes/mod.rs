use axum::Router;
use utoipa::OpenApi;

use crate::{
    services::documentation::{OverlayApi, ScheduleApi, ScoreboardApi},
    state::{OverlayState, ScheduleState, ScoreboardState},
};

pub mod docs;
pub mod health;
pub mod overlay;
pub mod schedule;
pub mod scoreboard;

/// Routes of the scoreboard panel with health and documentation.
pub fn scoreboard_router(state: ScoreboardState) -> Router<()> {
    scoreboard::router()
        .merge(health::router())
        .merge(docs::router(ScoreboardApi::openapi()))
        .with_state(state)
}

/// Routes of the program overlay controller with health and documentation.
pub fn overlay_router(state: OverlayState) -> Router<()> {
    overlay::router()
        .merge(health::router())
        .merge(docs::router(OverlayApi::openapi()))
        .with_state(state)
}

/// Routes of the schedule editor with health and documentation.
pub fn schedule_router(state: ScheduleState) -> Router<()> {
    schedule::router()
        .merge(health::router())
        .merge(docs::router(ScheduleApi::openapi()))
        .with_state(state)
}
