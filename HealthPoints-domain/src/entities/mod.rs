pub mod catalog;
pub mod conversions;
pub mod data_point;
pub mod measurement;

// Re-export common types for easier imports
pub use catalog::{DisplayNames, MeasurementCatalog, ValidUnits};
pub use data_point::{DataPoint, DataPointInput, NewDataPoint};
pub use measurement::{Measurement, UnknownMeasurement};
