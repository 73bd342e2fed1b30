use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use health_points_domain::entities::{DataPoint, DataPointInput};

/// Request payload for submitting a data point
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateDataPointRequest {
    /// Measurement kind: `weight`, `sbp` or `dbp`
    #[schema(example = "weight")]
    pub measurement: String,

    /// Measured value
    #[schema(example = 80.5)]
    pub value: Option<f64>,

    /// Unit of the value; must be valid for the measurement kind
    #[schema(example = "kg")]
    pub unit: Option<String>,
}

/// A stored data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DataPointResponse {
    /// Storage-assigned identifier
    pub id: i64,

    /// When the data point was stored (RFC 3339, UTC)
    pub timestamp: DateTime<Utc>,

    #[schema(example = "weight")]
    pub measurement: String,

    #[schema(example = 80.5)]
    pub value: f64,

    #[schema(example = "kg")]
    pub unit: String,
}

/// Query parameters for listing data points
#[derive(Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MeasurementQuery {
    /// Measurement kind to list. Matched verbatim; unknown kinds return an empty list.
    pub measurement: Option<String>,
}

// Read as raw key/value pairs so a repeated `measurement` keeps its first
// value and unrelated keys are ignored.
impl<'de> Deserialize<'de> for MeasurementQuery {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs = Vec::<(String, String)>::deserialize(deserializer)?;

        Ok(Self {
            measurement: pairs
                .into_iter()
                .find(|(key, _)| key == "measurement")
                .map(|(_, value)| value),
        })
    }
}

/// Convert a public request to the domain input
pub fn convert_to_domain_input(request: CreateDataPointRequest) -> DataPointInput {
    DataPointInput {
        measurement: request.measurement,
        value: request.value,
        unit: request.unit,
    }
}

/// Convert a domain data point to its public representation
pub fn convert_to_public_data_point(point: DataPoint) -> DataPointResponse {
    DataPointResponse {
        id: point.id,
        timestamp: point.timestamp,
        measurement: point.measurement.to_string(),
        value: point.value,
        unit: point.unit,
    }
}
