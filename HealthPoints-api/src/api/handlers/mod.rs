pub mod error;
pub mod measurements;
pub mod status;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use error::ApiError;
pub use measurements::{add_measurement, get_display_names, get_valid_units, list_measurements};
pub use status::status_check;
