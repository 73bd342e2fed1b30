// HealthPoints Data
// This crate handles database configuration, schema migrations and data access

// Database connection management
pub mod database;

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;
