// Database modules
pub mod connection;
pub mod migrations;

// Re-export database connection types and functions
pub use connection::{
    connection_uri, initialize_database_pool, DatabaseConfig, DatabaseError, DatabasePool,
    DatabaseType, SQLITE_IN_MEMORY,
};
