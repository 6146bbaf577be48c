use axum::{
    Form, Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use validator::Validate;

use crate::{
    dto::overlay::{
        ActiveOverlayView, EditOverlayEntryForm, NewOverlayEntryForm, OverlayEntryView,
        OverlayListResponse,
    },
    error::AppError,
    services::overlay_service,
    state::OverlayState,
};

/// Admin endpoints of the program overlay and the `/get_active` feed of the public page.
pub fn router() -> Router<OverlayState> {
    Router::new()
        .route("/programas", get(list_programs))
        .route("/get_programa/{id}", get(get_program))
        .route("/add", post(add_program))
        .route("/editar", post(edit_program))
        .route("/deletar/{id}", post(delete_program))
        .route("/selecionar/{id}", post(select_program))
        .route("/toggle_visibilidade", post(toggle_visibility))
        .route("/get_active", get(get_active))
}

/// List programs newest first with the active program's visibility.
#[utoipa::path(
    get,
    path = "/programas",
    tag = "overlay",
    responses((status = 200, description = "Stored programs", body = OverlayListResponse))
)]
pub async fn list_programs(
    State(state): State<OverlayState>,
) -> Result<Json<OverlayListResponse>, AppError> {
    Ok(Json(overlay_service::list_entries(&state).await?))
}

/// Fetch one program to fill the edit form.
#[utoipa::path(
    get,
    path = "/get_programa/{id}",
    tag = "overlay",
    params(("id" = i64, Path, description = "Program identifier")),
    responses(
        (status = 200, description = "Program", body = OverlayEntryView),
        (status = 404, description = "No program with this id")
    )
)]
pub async fn get_program(
    State(state): State<OverlayState>,
    Path(id): Path<i64>,
) -> Result<Json<OverlayEntryView>, AppError> {
    Ok(Json(overlay_service::get_entry(&state, id).await?))
}

/// Save a new, inactive program.
#[utoipa::path(
    post,
    path = "/add",
    tag = "overlay",
    request_body(content = NewOverlayEntryForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Program saved", body = String),
        (status = 400, description = "Missing title")
    )
)]
pub async fn add_program(
    State(state): State<OverlayState>,
    Form(form): Form<NewOverlayEntryForm>,
) -> Result<&'static str, AppError> {
    form.validate()?;
    overlay_service::add_entry(&state, form).await?;
    Ok("Salvo")
}

/// Overwrite the text of an existing program.
#[utoipa::path(
    post,
    path = "/editar",
    tag = "overlay",
    request_body(content = EditOverlayEntryForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Program updated", body = String))
)]
pub async fn edit_program(
    State(state): State<OverlayState>,
    Form(form): Form<EditOverlayEntryForm>,
) -> Result<&'static str, AppError> {
    overlay_service::edit_entry(&state, form).await?;
    Ok("Atualizado")
}

#[utoipa::path(
    post,
    path = "/deletar/{id}",
    tag = "overlay",
    params(("id" = i64, Path, description = "Program identifier")),
    responses((status = 200, description = "Program deleted", body = String))
)]
pub async fn delete_program(
    State(state): State<OverlayState>,
    Path(id): Path<i64>,
) -> Result<&'static str, AppError> {
    overlay_service::delete_entry(&state, id).await?;
    Ok("Deletado")
}

/// Put a program on air, deactivating every other one.
#[utoipa::path(
    post,
    path = "/selecionar/{id}",
    tag = "overlay",
    params(("id" = i64, Path, description = "Program identifier")),
    responses((status = 200, description = "Program active", body = String))
)]
pub async fn select_program(
    State(state): State<OverlayState>,
    Path(id): Path<i64>,
) -> Result<&'static str, AppError> {
    overlay_service::select_active(&state, id).await?;
    Ok("Ativado")
}

/// Show or hide the program on air.
#[utoipa::path(
    post,
    path = "/toggle_visibilidade",
    tag = "overlay",
    responses((status = 200, description = "Visibility flipped", body = String))
)]
pub async fn toggle_visibility(State(state): State<OverlayState>) -> Result<&'static str, AppError> {
    overlay_service::toggle_visibility(&state).await?;
    Ok("OK")
}

/// What the public overlay should render right now.
#[utoipa::path(
    get,
    path = "/get_active",
    tag = "overlay",
    responses((status = 200, description = "Active program or a hidden blank card", body = ActiveOverlayView))
)]
pub async fn get_active(
    State(state): State<OverlayState>,
) -> Result<Json<ActiveOverlayView>, AppError> {
    Ok(Json(overlay_service::get_active(&state).await?))
}
