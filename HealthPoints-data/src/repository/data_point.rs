use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, error};

use crate::database::DatabasePool;
use crate::models::{DataPointRecord, NewDataPointRecord};
use super::errors::RepositoryError;
use super::storage::DatabaseStorage;

/// Repository trait for health data points
#[async_trait]
pub trait DataPointRepositoryTrait: Send + Sync {
    /// Append a data point stamped with the current server time
    async fn insert(&self, point: NewDataPointRecord) -> Result<DataPointRecord, RepositoryError>;

    /// Get every data point whose measurement equals `measurement`, oldest insert first
    async fn list_by_measurement(&self, measurement: &str) -> Result<Vec<DataPointRecord>, RepositoryError>;

    /// Check that the underlying store is reachable
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Repository for data points backed by a database pool.
///
/// Cloning is cheap; clones share the pool.
#[derive(Debug, Clone)]
pub struct DataPointRepository {
    pool: DatabasePool,
}

impl DataPointRepository {
    /// Create a new repository over an initialized pool
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DataPointRepositoryTrait for DataPointRepository {
    async fn insert(&self, point: NewDataPointRecord) -> Result<DataPointRecord, RepositoryError> {
        let timestamp = Utc::now();

        match DatabaseStorage::insert(&self.pool, point, timestamp).await {
            Ok(record) => {
                debug!("Stored data point: id={}", record.id);
                Ok(record)
            }
            Err(e) => {
                error!("Failed to insert data point: {}", e);
                Err(e)
            }
        }
    }

    async fn list_by_measurement(&self, measurement: &str) -> Result<Vec<DataPointRecord>, RepositoryError> {
        match DatabaseStorage::list_by_measurement(&self.pool, measurement).await {
            Ok(records) => {
                debug!("Found {} data points for measurement {:?}", records.len(), measurement);
                Ok(records)
            }
            Err(e) => {
                error!("Failed to get data points: {}", e);
                Err(e)
            }
        }
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        DatabaseStorage::ping(&self.pool).await
    }
}

/// Mock data point repository for testing
#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use super::*;
    use std::sync::{Arc, RwLock};
    use std::time::Duration;
    use crate::database::DatabaseError;

    /// In-process implementation of the repository for tests.
    ///
    /// Clones share the stored records. Failures can be injected per
    /// operation to exercise error paths.
    #[derive(Debug, Clone, Default)]
    pub struct MockDataPointRepository {
        records: Arc<RwLock<Vec<DataPointRecord>>>,
        fail_writes: bool,
        fail_reads: bool,
        delay: Option<Duration>,
    }

    impl MockDataPointRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a mock repository with predefined records
        pub fn with_records(records: Vec<DataPointRecord>) -> Self {
            Self {
                records: Arc::new(RwLock::new(records)),
                ..Self::default()
            }
        }

        /// Configure the mock to fail every insert
        pub fn with_write_failure(mut self) -> Self {
            self.fail_writes = true;
            self
        }

        /// Configure the mock to fail every read and ping
        pub fn with_read_failure(mut self) -> Self {
            self.fail_reads = true;
            self
        }

        /// Configure the mock to wait before answering inserts and reads
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        /// Snapshot of everything stored so far
        pub fn records(&self) -> Vec<DataPointRecord> {
            self.records.read().map(|r| r.clone()).unwrap_or_default()
        }

        async fn wait(&self) {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
        }

        fn unavailable(operation: &str) -> RepositoryError {
            RepositoryError::Database(DatabaseError::GenericError(format!(
                "connection refused during {}",
                operation
            )))
        }
    }

    #[async_trait]
    impl DataPointRepositoryTrait for MockDataPointRepository {
        async fn insert(&self, point: NewDataPointRecord) -> Result<DataPointRecord, RepositoryError> {
            self.wait().await;
            if self.fail_writes {
                return Err(Self::unavailable("insert"));
            }

            let mut records = self.records.write()?;
            let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
            let record = DataPointRecord {
                id,
                timestamp: Utc::now(),
                measurement: point.measurement,
                value: point.value,
                unit: point.unit,
            };
            records.push(record.clone());

            Ok(record)
        }

        async fn list_by_measurement(&self, measurement: &str) -> Result<Vec<DataPointRecord>, RepositoryError> {
            self.wait().await;
            if self.fail_reads {
                return Err(Self::unavailable("select"));
            }

            let records = self.records.read()?;
            Ok(records
                .iter()
                .filter(|r| r.measurement == measurement)
                .cloned()
                .collect())
        }

        async fn ping(&self) -> Result<(), RepositoryError> {
            if self.fail_reads {
                return Err(Self::unavailable("ping"));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_mock_assigns_sequential_ids() {
        let repo = MockDataPointRepository::new();
        let point = NewDataPointRecord {
            measurement: "weight".to_string(),
            value: 80.5,
            unit: "kg".to_string(),
        };

        let first = repo.insert(point.clone()).await.unwrap();
        let second = repo.insert(point).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.records().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_failure_injection() {
        let repo = MockDataPointRepository::new().with_write_failure().with_read_failure();
        let point = NewDataPointRecord {
            measurement: "weight".to_string(),
            value: 80.5,
            unit: "kg".to_string(),
        };

        assert!(repo.insert(point).await.is_err());
        assert!(repo.list_by_measurement("weight").await.is_err());
        assert!(repo.ping().await.is_err());
    }
}
