use axum::Json;
use utoipa::OpenApi;

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health data endpoints
        crate::api::handlers::measurements::get_valid_units,
        crate::api::handlers::measurements::get_display_names,
        crate::api::handlers::measurements::list_measurements,
        crate::api::handlers::measurements::add_measurement,

        // System endpoints
        crate::api::handlers::status::status_check
    ),
    components(
        schemas(
            // Entities
            crate::entities::CreateDataPointRequest,
            crate::entities::DataPointResponse,
            crate::entities::ErrorResponse,

            // Status handler
            crate::api::handlers::status::HealthResponse,
            crate::api::handlers::status::ComponentStatus,
            crate::api::handlers::status::ComponentHealthStatus
        )
    ),
    tags(
        (name = "health_data", description = "Health measurement endpoints"),
        (name = "system", description = "Service status endpoint")
    ),
    info(
        title = "HealthPoints API",
        version = "0.1.0",
        description = "API for tracking weight and blood pressure measurements",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
