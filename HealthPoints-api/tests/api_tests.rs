use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use health_points_api::{create_app, ServerConfig};
use health_points_data::database::{initialize_database_pool, DatabaseConfig};
use health_points_data::repository::DataPointRepository;
use health_points_domain::entities::MeasurementCatalog;
use health_points_domain::health::HealthService;
use health_points_domain::services::HealthDataService;
use health_points_domain::testing::MockDataPointRepository;

/// Router over a fresh in-memory SQLite database
async fn sqlite_app() -> Router {
    let pool = initialize_database_pool(&DatabaseConfig::in_memory())
        .await
        .expect("Failed to initialize in-memory database");
    let repository = DataPointRepository::new(pool);

    create_app(
        Arc::new(HealthDataService::new(repository.clone(), MeasurementCatalog::default())),
        Arc::new(HealthService::new(repository)),
        &ServerConfig::default(),
    )
}

/// Router over an in-process repository
fn mock_app(repository: MockDataPointRepository) -> Router {
    mock_app_with_config(repository, &ServerConfig::default())
}

fn mock_app_with_config(repository: MockDataPointRepository, config: &ServerConfig) -> Router {
    create_app(
        Arc::new(HealthDataService::new(repository.clone(), MeasurementCatalog::default())),
        Arc::new(HealthService::new(repository)),
        config,
    )
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_raw(app: &Router, body: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/health")
        .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn post_json(app: &Router, body: Value) -> (StatusCode, Vec<u8>) {
    post_raw(app, &body.to_string()).await
}

fn error_message(body: &[u8]) -> String {
    let value: Value = serde_json::from_slice(body).unwrap();
    value["error"].as_str().expect("error field").to_string()
}

#[tokio::test]
async fn test_valid_units() {
    let app = sqlite_app().await;
    let (status, body) = get_json(&app, "/health/valid-units").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"dbp": ["mmHg"], "sbp": ["mmHg"], "weight": ["kg", "lbs"]}));
}

#[tokio::test]
async fn test_display_names() {
    let app = sqlite_app().await;
    let (status, body) = get_json(&app, "/health/display-names").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "en": {
                "weight": "Weight",
                "sbp": "Systolic Blood Pressure",
                "dbp": "Diastolic Blood Pressure"
            },
            "fi": {
                "weight": "Paino",
                "sbp": "Verenpaine, yläpaine",
                "dbp": "Verenpaine, alapaine"
            }
        })
    );
}

#[tokio::test]
async fn test_add_then_list() {
    let app = sqlite_app().await;

    let (status, body) = post_json(&app, json!({"measurement": "weight", "value": 100, "unit": "kg"})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.is_empty());

    let (status, body) = get_json(&app, "/health?measurement=weight").await;
    assert_eq!(status, StatusCode::OK);

    let points = body.as_array().expect("array body");
    assert_eq!(points.len(), 1);
    assert_eq!(points[0]["measurement"], "weight");
    assert_eq!(points[0]["value"].as_f64(), Some(100.0));
    assert_eq!(points[0]["unit"], "kg");
    assert!(points[0]["id"].as_i64().is_some());
}

#[tokio::test]
async fn test_timestamp_is_assigned_by_server() {
    let app = sqlite_app().await;

    let (status, _) = post_json(&app, json!({"measurement": "sbp", "value": 120, "unit": "mmHg"})).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = get_json(&app, "/health?measurement=sbp").await;
    let timestamp = body[0]["timestamp"].as_str().expect("timestamp string");
    let timestamp = DateTime::parse_from_rfc3339(timestamp)
        .expect("RFC 3339 timestamp")
        .with_timezone(&Utc);

    let delta = Utc::now().signed_duration_since(timestamp);
    assert!(delta.num_seconds().abs() < 5, "timestamp too far from now: {}", timestamp);
}

#[tokio::test]
async fn test_every_valid_pair_is_accepted() {
    let app = sqlite_app().await;
    let catalog = MeasurementCatalog::default();

    for (kind, units) in catalog.valid_units() {
        for unit in units {
            let (status, _) = post_json(&app, json!({"measurement": kind, "value": 1.5, "unit": unit})).await;
            assert_eq!(status, StatusCode::CREATED, "{} {}", kind, unit);
        }

        let (_, body) = get_json(&app, &format!("/health?measurement={}", kind)).await;
        assert_eq!(body.as_array().map(Vec::len), Some(units.len()));
    }
}

#[tokio::test]
async fn test_unit_not_allowed_for_kind() {
    let app = sqlite_app().await;

    let (status, body) = post_json(&app, json!({"measurement": "weight", "value": 100, "unit": "rock"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(&body),
        "unit 'rock' is not allowed for measurement 'weight' (expected one of: kg, lbs)"
    );

    let (status, _) = post_json(&app, json!({"measurement": "sbp", "value": 120, "unit": "kg"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = get_json(&app, "/health?measurement=weight").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_unknown_measurement_kind() {
    let app = sqlite_app().await;

    let (status, body) = post_json(
        &app,
        json!({"measurement": "enlightenment", "value": 100, "unit": "lumen"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).contains("enlightenment"));
}

#[tokio::test]
async fn test_missing_value_and_unit() {
    let app = sqlite_app().await;

    let (status, body) = post_json(&app, json!({"measurement": "weight", "unit": "kg"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "value is required");

    let (status, body) = post_json(&app, json!({"measurement": "weight", "value": 80})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "unit is required");

    let (status, _) = post_json(&app, json!({"measurement": "weight", "value": 80, "unit": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_zero_value_is_accepted() {
    let app = sqlite_app().await;

    let (status, _) = post_json(&app, json!({"measurement": "weight", "value": 0, "unit": "kg"})).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_malformed_bodies_are_rejected() {
    let app = sqlite_app().await;

    let (status, body) = post_raw(&app, "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error_message(&body).is_empty());

    let (status, _) = post_raw(&app, r#"{"measurement": "weight", "value": "heavy", "unit": "kg"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_raw(&app, r#"{"value": 80, "unit": "kg"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/health")
        .body(Body::from("measurement=weight"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error_message(&body).is_empty());
}

#[tokio::test]
async fn test_list_is_lenient() {
    let app = sqlite_app().await;
    post_json(&app, json!({"measurement": "dbp", "value": 80, "unit": "mmHg"})).await;

    let (status, body) = get_json(&app, "/health?measurement=enlightenment").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_repeated_parameter_uses_first_value() {
    let app = sqlite_app().await;
    post_json(&app, json!({"measurement": "weight", "value": 80, "unit": "kg"})).await;
    post_json(&app, json!({"measurement": "sbp", "value": 120, "unit": "mmHg"})).await;

    let (status, body) = get_json(&app, "/health?measurement=weight&measurement=sbp").await;
    assert_eq!(status, StatusCode::OK);
    let points = body.as_array().expect("array body");
    assert_eq!(points.len(), 1);
    assert_eq!(points[0]["measurement"], "weight");

    let (status, body) = get_json(&app, "/health?page=2&measurement=sbp").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["measurement"], "sbp");
}

#[tokio::test]
async fn test_list_is_ordered_and_repeatable() {
    let app = sqlite_app().await;
    for value in [81.0, 80.5, 79.9] {
        post_json(&app, json!({"measurement": "weight", "value": value, "unit": "kg"})).await;
    }

    let (_, first) = get_json(&app, "/health?measurement=weight").await;
    let (_, second) = get_json(&app, "/health?measurement=weight").await;
    assert_eq!(first, second);

    let values: Vec<f64> = first
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["value"].as_f64())
        .collect();
    assert_eq!(values, vec![81.0, 80.5, 79.9]);
}

#[tokio::test]
async fn test_storage_failures_return_500() {
    let app = mock_app(MockDataPointRepository::new().with_write_failure().with_read_failure());

    let (status, body) = post_json(&app, json!({"measurement": "weight", "value": 100, "unit": "kg"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_message(&body).starts_with("failed to insert data point"));

    let (status, body) = get_json(&app, "/health?measurement=weight").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn test_timeout_returns_json_error() {
    let config = ServerConfig {
        request_timeout: Duration::from_millis(50),
        ..ServerConfig::default()
    };
    let app = mock_app_with_config(
        MockDataPointRepository::new().with_delay(Duration::from_millis(500)),
        &config,
    );

    let (status, body) = get_json(&app, "/health?measurement=weight").await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(body, json!({"error": "request timed out"}));

    let (status, body) = post_json(&app, json!({"measurement": "weight", "value": 80, "unit": "kg"})).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(error_message(&body), "request timed out");
}

#[tokio::test]
async fn test_validation_runs_before_storage() {
    let app = mock_app(MockDataPointRepository::new().with_write_failure());

    let (status, _) = post_json(&app, json!({"measurement": "weight", "value": 100, "unit": "rock"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_endpoint() {
    let app = sqlite_app().await;
    let (status, body) = get_json(&app, "/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["components"]["database"]["status"], "ok");
    assert_eq!(body["environment"], "development");

    let app = mock_app(MockDataPointRepository::new().with_read_failure());
    let (status, body) = get_json(&app, "/status").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_openapi_document() {
    let app = sqlite_app().await;
    let (status, body) = get_json(&app, "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/health"]["post"].is_object());
    assert!(body["paths"]["/health/valid-units"]["get"].is_object());
}
