// Domain services
// This module contains business logic implementations.
pub mod health_data;

// Re-export service traits and errors
pub use health_data::{HealthDataService, HealthDataServiceTrait, ServiceError};
