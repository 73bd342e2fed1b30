use std::sync::Arc;

use axum::{
    body::to_bytes,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::{json, Value};

use health_points_data::models::DataPointRecord;
use health_points_domain::entities::MeasurementCatalog;
use health_points_domain::testing::{create_mock_health_data_service, MockDataPointRepository};
use health_points_domain::HealthDataService;

use crate::api::handlers::measurements::{self, HealthDataServiceRef};
use crate::entities::MeasurementQuery;

fn service_with(repository: MockDataPointRepository) -> HealthDataServiceRef {
    Arc::new(HealthDataService::new(repository, MeasurementCatalog::default()))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_get_valid_units() {
    let service: HealthDataServiceRef = Arc::new(create_mock_health_data_service());

    let response = measurements::get_valid_units(State(service)).await.into_response();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"weight": ["kg", "lbs"], "sbp": ["mmHg"], "dbp": ["mmHg"]})
    );
}

#[tokio::test]
async fn test_get_display_names() {
    let service: HealthDataServiceRef = Arc::new(create_mock_health_data_service());

    let response = measurements::get_display_names(State(service)).await.into_response();
    let body = body_json(response).await;

    assert_eq!(body["en"]["sbp"], "Systolic Blood Pressure");
    assert_eq!(body["fi"]["weight"], "Paino");
}

#[tokio::test]
async fn test_list_measurements_filters_by_kind() {
    let now = chrono::Utc::now();
    let repository = MockDataPointRepository::with_records(vec![
        DataPointRecord {
            id: 1,
            timestamp: now,
            measurement: "weight".to_string(),
            value: 80.0,
            unit: "kg".to_string(),
        },
        DataPointRecord {
            id: 2,
            timestamp: now,
            measurement: "sbp".to_string(),
            value: 120.0,
            unit: "mmHg".to_string(),
        },
    ]);

    let response = measurements::list_measurements(
        State(service_with(repository)),
        Ok(Query(MeasurementQuery {
            measurement: Some("sbp".to_string()),
        })),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let points = body.as_array().expect("array body");
    assert_eq!(points.len(), 1);
    assert_eq!(points[0]["id"], 2);
    assert_eq!(points[0]["unit"], "mmHg");
}

#[tokio::test]
async fn test_list_measurements_without_kind_is_empty() {
    let response = measurements::list_measurements(
        State(service_with(MockDataPointRepository::new())),
        Ok(Query(MeasurementQuery { measurement: None })),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_list_measurements_storage_failure() {
    let response = measurements::list_measurements(
        State(service_with(MockDataPointRepository::new().with_read_failure())),
        Ok(Query(MeasurementQuery {
            measurement: Some("weight".to_string()),
        })),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("failed to get data points"));
}
