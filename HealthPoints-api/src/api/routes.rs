use axum::{middleware, routing::get, Extension, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::debug;

use crate::api::handlers::error::timeout_as_json;
use crate::api::handlers::measurements::{self, HealthDataServiceRef};
use crate::api::handlers::status::{self, HealthServiceRef, StatusContext};
use crate::config::ServerConfig;
use crate::openapi;

/// Create the application router
pub fn create_app(
    health_data_service: HealthDataServiceRef,
    health_service: HealthServiceRef,
    config: &ServerConfig,
) -> Router {
    debug!("Creating application router");

    let health_data_routes = Router::new()
        .route("/health/valid-units", get(measurements::get_valid_units))
        .route("/health/display-names", get(measurements::get_display_names))
        .route(
            "/health",
            get(measurements::list_measurements).post(measurements::add_measurement),
        )
        .with_state(health_data_service);

    debug!("Health data routes configured");

    let system_routes = Router::new()
        .route("/status", get(status::status_check))
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .layer(Extension(StatusContext {
            health_service,
            environment: config.environment.clone(),
        }));

    debug!("System routes configured");

    status::initialize_server_start_time();

    Router::new()
        .merge(health_data_routes)
        .merge(system_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(middleware::map_response(timeout_as_json))
}
