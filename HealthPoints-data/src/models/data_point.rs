use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage model for a persisted data point (one row of `health_data`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DataPointRecord {
    /// Storage-assigned surrogate key
    pub id: i64,

    /// When the row was written, assigned by the repository
    pub timestamp: DateTime<Utc>,

    /// Measurement kind as stored (e.g. "weight")
    pub measurement: String,

    /// Measured value
    pub value: f64,

    /// Unit of the value (e.g. "kg")
    pub unit: String,
}

/// Input data for appending a new data point.
///
/// Identity and timestamp are assigned on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDataPointRecord {
    /// Measurement kind
    pub measurement: String,

    /// Measured value
    pub value: f64,

    /// Unit of the value
    pub unit: String,
}
