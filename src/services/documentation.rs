use utoipa::OpenApi;

#[derive(OpenApi)]
/// OpenAPI specification of the scoreboard panel.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::scoreboard::get_match,
        crate::routes::scoreboard::update_match,
        crate::routes::scoreboard::add_penalty,
        crate::routes::scoreboard::clear_penalties,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::HealthStatus,
            crate::dto::scoreboard::MatchView,
            crate::dto::scoreboard::MatchUpdateRequest,
            crate::dto::scoreboard::TimerActionDto,
            crate::dto::scoreboard::PenaltyRequest,
            crate::dto::scoreboard::PenaltyView,
            crate::dto::scoreboard::SideDto,
            crate::dto::scoreboard::PenaltyResultDto,
            crate::dto::scoreboard::StatusResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "scoreboard", description = "Match clock, score and penalty shootout"),
    )
)]
pub struct ScoreboardApi;

#[derive(OpenApi)]
/// OpenAPI specification of the program overlay controller.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::overlay::list_programs,
        crate::routes::overlay::get_program,
        crate::routes::overlay::add_program,
        crate::routes::overlay::edit_program,
        crate::routes::overlay::delete_program,
        crate::routes::overlay::select_program,
        crate::routes::overlay::toggle_visibility,
        crate::routes::overlay::get_active,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::HealthStatus,
            crate::dto::overlay::OverlayEntryView,
            crate::dto::overlay::OverlayListResponse,
            crate::dto::overlay::ActiveOverlayView,
            crate::dto::overlay::NewOverlayEntryForm,
            crate::dto::overlay::EditOverlayEntryForm,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "overlay", description = "Program overlay entries and on-air selection"),
    )
)]
pub struct OverlayApi;

#[derive(OpenApi)]
/// OpenAPI specification of the weekly schedule editor.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::schedule::list_entries,
        crate::routes::schedule::create_entry,
        crate::routes::schedule::update_entry,
        crate::routes::schedule::delete_entry,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::HealthStatus,
            crate::dto::schedule::ScheduleEntryView,
            crate::dto::schedule::ScheduleEntryRequest,
            crate::dto::schedule::CreatedResponse,
            crate::dto::schedule::StatusResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "schedule", description = "Weekly radio grid"),
    )
)]
pub struct ScheduleApi;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_panel_documents_its_own_routes() {
        let scoreboard = ScoreboardApi::openapi();
        assert!(scoreboard.paths.paths.contains_key("/api/match"));
        assert!(!scoreboard.paths.paths.contains_key("/get_active"));

        let overlay = OverlayApi::openapi();
        assert!(overlay.paths.paths.contains_key("/selecionar/{id}"));

        let schedule = ScheduleApi::openapi();
        assert!(schedule.paths.paths.contains_key("/api/programas/{id}"));
        assert!(schedule.paths.paths.contains_key("/healthcheck"));
    }
}
