// Testing utilities for the domain layer
// This module is only available when the "mock" feature is enabled

// Re-export useful test mocks from the data layer
pub use health_points_data::repository::tests::MockDataPointRepository;

use crate::entities::MeasurementCatalog;
use crate::health::HealthService;
use crate::services::HealthDataService;

/// Health data service over an empty in-process repository
pub fn create_mock_health_data_service() -> HealthDataService<MockDataPointRepository> {
    HealthDataService::new(MockDataPointRepository::new(), MeasurementCatalog::default())
}

/// Health data and health services sharing `repository`
pub fn create_mock_services(
    repository: MockDataPointRepository,
) -> (HealthDataService<MockDataPointRepository>, HealthService<MockDataPointRepository>) {
    (
        HealthDataService::new(repository.clone(), MeasurementCatalog::default()),
        HealthService::new(repository),
    )
}
