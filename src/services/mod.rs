/// OpenAPI documentation generation.
pub mod documentation;
/// Storage check behind `/healthcheck`.
pub mod health_service;
/// Program overlay CRUD and active-entry selection.
pub mod overlay_service;
/// Weekly grid CRUD and reseeding.
pub mod schedule_service;
/// Match clock, scores and penalty shootout.
pub mod scoreboard_service;
