use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Json, Query, State,
    },
    http::StatusCode,
};
use tracing::{info, instrument, warn};

use health_points_domain::entities::{DisplayNames, ValidUnits};
use health_points_domain::HealthDataServiceTrait;

use super::error::ApiError;
use crate::entities::data_point::{convert_to_domain_input, convert_to_public_data_point};
use crate::entities::{CreateDataPointRequest, DataPointResponse, ErrorResponse, MeasurementQuery};

/// Service type for dependency injection
pub type HealthDataServiceRef = Arc<dyn HealthDataServiceTrait + Send + Sync>;

/// Get the units accepted for each measurement kind
#[utoipa::path(
    get,
    path = "/health/valid-units",
    responses(
        (status = 200, description = "Map of measurement kind to its accepted units"),
    ),
    tag = "health_data"
)]
#[instrument(skip(service))]
pub async fn get_valid_units(State(service): State<HealthDataServiceRef>) -> Json<ValidUnits> {
    Json(service.catalog().valid_units().clone())
}

/// Get the localized display names of each measurement kind
#[utoipa::path(
    get,
    path = "/health/display-names",
    responses(
        (status = 200, description = "Map of locale to measurement kind to label"),
    ),
    tag = "health_data"
)]
#[instrument(skip(service))]
pub async fn get_display_names(State(service): State<HealthDataServiceRef>) -> Json<DisplayNames> {
    Json(service.catalog().display_names().clone())
}

/// List stored data points of one measurement kind, oldest first
#[utoipa::path(
    get,
    path = "/health",
    params(MeasurementQuery),
    responses(
        (status = 200, description = "Data points of the requested kind", body = [DataPointResponse]),
        (status = 500, description = "Storage error", body = ErrorResponse),
    ),
    tag = "health_data"
)]
#[instrument(skip(service, query))]
pub async fn list_measurements(
    State(service): State<HealthDataServiceRef>,
    query: Result<Query<MeasurementQuery>, QueryRejection>,
) -> Result<Json<Vec<DataPointResponse>>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        warn!("Could not read query string: {}", rejection.body_text());
        ApiError::Bind(rejection.body_text())
    })?;
    let measurement = query.measurement.unwrap_or_default();

    let points = service.list_measurements(&measurement).await?;
    info!("Returning {} data points for {:?}", points.len(), measurement);

    Ok(Json(points.into_iter().map(convert_to_public_data_point).collect()))
}

/// Submit a new data point
#[utoipa::path(
    post,
    path = "/health",
    request_body = CreateDataPointRequest,
    responses(
        (status = 201, description = "Data point stored"),
        (status = 400, description = "Malformed or invalid data point", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse),
    ),
    tag = "health_data"
)]
#[instrument(skip(service, payload))]
pub async fn add_measurement(
    State(service): State<HealthDataServiceRef>,
    payload: Result<Json<CreateDataPointRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Could not bind data point: {}", rejection.body_text());
        ApiError::Bind(rejection.body_text())
    })?;

    service.add_measurement(convert_to_domain_input(request)).await?;

    Ok(StatusCode::CREATED)
}
