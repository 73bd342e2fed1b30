// HealthPoints Domain
// This crate contains the business logic for the HealthPoints application

// Domain entities: measurement kinds, catalog tables and data points
pub mod entities;

// Validation of submitted data points
pub mod validation;

// Services that implement business logic
pub mod services;

// Health checks and system status
pub mod health;

// Testing utilities - only available with mock feature
#[cfg(feature = "mock")]
pub mod testing;

// Re-export common types for easier imports
pub use entities::{DataPoint, DataPointInput, Measurement, MeasurementCatalog, NewDataPoint};
pub use services::{HealthDataService, HealthDataServiceTrait, ServiceError};
pub use validation::{validate_data_point, ValidationError};
