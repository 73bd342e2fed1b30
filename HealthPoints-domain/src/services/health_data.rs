use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::entities::conversions;
use crate::entities::{DataPoint, DataPointInput, MeasurementCatalog, NewDataPoint};
use crate::validation::{validate_data_point, ValidationError};
use health_points_data::repository::{DataPointRepositoryTrait, RepositoryError};

/// Health data service errors
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The submitted data point was rejected
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Reading from or writing to storage failed
    #[error("{0}")]
    Storage(String),
}

/// Trait for health data service operations
#[async_trait]
pub trait HealthDataServiceTrait: Send + Sync {
    /// The reference tables used for validation
    fn catalog(&self) -> &MeasurementCatalog;

    /// Validate a submitted data point without storing it
    fn validate(&self, input: &DataPointInput) -> Result<NewDataPoint, ValidationError>;

    /// Validate and store a data point
    async fn add_measurement(&self, input: DataPointInput) -> Result<DataPoint, ServiceError>;

    /// Get every stored data point of a measurement kind.
    ///
    /// The kind is matched verbatim; an unknown kind yields an empty list.
    async fn list_measurements(&self, measurement: &str) -> Result<Vec<DataPoint>, ServiceError>;
}

/// Health data service for domain logic
pub struct HealthDataService<R: DataPointRepositoryTrait> {
    repository: R,
    catalog: MeasurementCatalog,
}

impl<R: DataPointRepositoryTrait> HealthDataService<R> {
    /// Create a new service over a repository and catalog
    pub fn new(repository: R, catalog: MeasurementCatalog) -> Self {
        Self { repository, catalog }
    }

    fn map_repo_error(context: &str, err: RepositoryError) -> ServiceError {
        error!("{}: {}", context, err);
        ServiceError::Storage(format!("{}: {}", context, err))
    }
}

#[async_trait]
impl<R: DataPointRepositoryTrait> HealthDataServiceTrait for HealthDataService<R> {
    fn catalog(&self) -> &MeasurementCatalog {
        &self.catalog
    }

    fn validate(&self, input: &DataPointInput) -> Result<NewDataPoint, ValidationError> {
        validate_data_point(&self.catalog, input)
    }

    #[instrument(skip(self))]
    async fn add_measurement(&self, input: DataPointInput) -> Result<DataPoint, ServiceError> {
        let point = self.validate(&input).map_err(|e| {
            warn!("Rejected data point: {}", e);
            e
        })?;

        let record = self
            .repository
            .insert(conversions::convert_to_data_new_record(&point))
            .await
            .map_err(|e| Self::map_repo_error("failed to insert data point", e))?;

        let stored = conversions::convert_to_domain_data_point(record).map_err(ServiceError::Storage)?;
        info!("Stored {} data point with id {}", stored.measurement, stored.id);

        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn list_measurements(&self, measurement: &str) -> Result<Vec<DataPoint>, ServiceError> {
        let records = self
            .repository
            .list_by_measurement(measurement)
            .await
            .map_err(|e| Self::map_repo_error("failed to get data points", e))?;

        records
            .into_iter()
            .map(conversions::convert_to_domain_data_point)
            .collect::<Result<Vec<_>, _>>()
            .map_err(ServiceError::Storage)
    }
}
