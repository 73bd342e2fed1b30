// Public entities for the HealthPoints API
// This module contains data structures that are shared across the application boundary

// Common entities for error handling
pub mod common;

// Data point entities
pub mod data_point;

pub use common::ErrorResponse;
pub use data_point::{CreateDataPointRequest, DataPointResponse, MeasurementQuery};
