// Repository module structure
pub mod errors;
mod data_point;
mod storage;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use data_point::{DataPointRepository, DataPointRepositoryTrait};

// Re-export test modules for both testing and when mock feature is enabled
#[cfg(any(test, feature = "mock"))]
pub use data_point::tests;
