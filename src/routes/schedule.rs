use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use validator::Validate;

use crate::{
    dto::schedule::{CreatedResponse, ScheduleEntryRequest, ScheduleEntryView, StatusResponse},
    error::AppError,
    services::schedule_service,
    state::ScheduleState,
};

/// REST endpoints of the weekly grid editor.
pub fn router() -> Router<ScheduleState> {
    Router::new()
        .route("/api/programas", get(list_entries).post(create_entry))
        .route("/api/programas/{id}", put(update_entry).delete(delete_entry))
}

/// List every slot of the grid.
#[utoipa::path(
    get,
    path = "/api/programas",
    tag = "schedule",
    responses((status = 200, description = "Weekly grid", body = [ScheduleEntryView]))
)]
pub async fn list_entries(
    State(state): State<ScheduleState>,
) -> Result<Json<Vec<ScheduleEntryView>>, AppError> {
    Ok(Json(schedule_service::list_entries(&state).await?))
}

/// Add a slot to the grid.
#[utoipa::path(
    post,
    path = "/api/programas",
    tag = "schedule",
    request_body = ScheduleEntryRequest,
    responses(
        (status = 201, description = "Slot created", body = CreatedResponse),
        (status = 400, description = "Missing horario, nome or dias")
    )
)]
pub async fn create_entry(
    State(state): State<ScheduleState>,
    Json(payload): Json<ScheduleEntryRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    payload.validate()?;
    let created = schedule_service::create_entry(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Overwrite a slot.
#[utoipa::path(
    put,
    path = "/api/programas/{id}",
    tag = "schedule",
    params(("id" = i64, Path, description = "Slot identifier")),
    request_body = ScheduleEntryRequest,
    responses(
        (status = 200, description = "Slot updated (or nothing to update)", body = StatusResponse),
        (status = 400, description = "Missing horario, nome or dias")
    )
)]
pub async fn update_entry(
    State(state): State<ScheduleState>,
    Path(id): Path<i64>,
    Json(payload): Json<ScheduleEntryRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    payload.validate()?;
    Ok(Json(schedule_service::update_entry(&state, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/programas/{id}",
    tag = "schedule",
    params(("id" = i64, Path, description = "Slot identifier")),
    responses((status = 200, description = "Slot deleted", body = StatusResponse))
)]
pub async fn delete_entry(
    State(state): State<ScheduleState>,
    Path(id): Path<i64>,
) -> Result<Json<StatusResponse>, AppError> {
    Ok(Json(schedule_service::delete_entry(&state, id).await?))
}
