use chrono::{DateTime, Utc};

use super::measurement::Measurement;

/// A data point as submitted by a client, before validation.
///
/// `value` and `unit` are optional so that their absence can be told
/// apart from a zero value or an empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPointInput {
    /// Measurement kind as sent by the client
    pub measurement: String,

    /// Measured value
    pub value: Option<f64>,

    /// Unit of the value
    pub unit: Option<String>,
}

/// A validated data point ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewDataPoint {
    pub measurement: Measurement,
    pub value: f64,
    pub unit: String,
}

/// A stored data point
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    /// Storage-assigned identifier
    pub id: i64,

    /// Server time at which the point was stored
    pub timestamp: DateTime<Utc>,

    pub measurement: Measurement,

    pub value: f64,

    pub unit: String,
}
