use axum::Router;
use utoipa::openapi::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Serve the Swagger UI backed by the panel's OpenAPI document.
pub fn router<S>(api: OpenApi) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/docs")
        .url("/api-doc/openapi.json", api)
        .into()
}
