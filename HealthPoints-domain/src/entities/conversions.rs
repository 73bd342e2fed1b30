use health_points_data::models::{DataPointRecord, NewDataPointRecord};

use super::data_point::{DataPoint, NewDataPoint};
use super::measurement::Measurement;

// Conversion functions between domain entities and data models,
// named convert_to_[target_layer]_[model_name]

/// Convert a validated domain data point to the data model for insertion
pub fn convert_to_data_new_record(point: &NewDataPoint) -> NewDataPointRecord {
    NewDataPointRecord {
        measurement: point.measurement.as_str().to_string(),
        value: point.value,
        unit: point.unit.clone(),
    }
}

/// Convert a stored record to a domain data point.
///
/// Fails if the stored measurement is not a known kind.
pub fn convert_to_domain_data_point(record: DataPointRecord) -> Result<DataPoint, String> {
    let measurement = record.measurement.parse::<Measurement>().map_err(|e| {
        format!("stored data point {} is invalid: {}", record.id, e)
    })?;

    Ok(DataPoint {
        id: record.id,
        timestamp: record.timestamp,
        measurement,
        value: record.value,
        unit: record.unit,
    })
}
