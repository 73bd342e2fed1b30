//! Semantic validation of submitted data points
//!
//! Rules are checked in order and the first failure wins:
//! 1. the measurement kind is known
//! 2. a value is present
//! 3. a non-empty unit is present
//! 4. the unit is accepted for the kind

use thiserror::Error;

use crate::entities::{DataPointInput, Measurement, MeasurementCatalog, NewDataPoint};

/// Reasons a data point is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("unknown measurement kind '{0}' (expected one of: {})", Measurement::known_names())]
    UnknownMeasurementKind(String),

    #[error("value is required")]
    MissingValue,

    #[error("unit is required")]
    MissingUnit,

    #[error(
        "unit '{unit}' is not allowed for measurement '{measurement}' (expected one of: {})",
        .allowed.join(", ")
    )]
    UnitNotAllowedForKind {
        measurement: Measurement,
        unit: String,
        allowed: Vec<String>,
    },
}

/// Validate a submitted data point against the catalog.
///
/// Pure; never touches storage.
pub fn validate_data_point(
    catalog: &MeasurementCatalog,
    input: &DataPointInput,
) -> Result<NewDataPoint, ValidationError> {
    let measurement = input
        .measurement
        .parse::<Measurement>()
        .map_err(|_| ValidationError::UnknownMeasurementKind(input.measurement.clone()))?;

    let value = input.value.ok_or(ValidationError::MissingValue)?;

    let unit = match input.unit.as_deref() {
        Some(unit) if !unit.is_empty() => unit,
        _ => return Err(ValidationError::MissingUnit),
    };

    if !catalog.unit_allowed(measurement, unit) {
        return Err(ValidationError::UnitNotAllowedForKind {
            measurement,
            unit: unit.to_string(),
            allowed: catalog.units_for(measurement).to_vec(),
        });
    }

    Ok(NewDataPoint {
        measurement,
        value,
        unit: unit.to_string(),
    })
}
