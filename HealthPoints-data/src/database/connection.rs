//! Database connection module for the HealthPoints application
//!
//! This module provides database connectivity with support for two backends:
//! - PostgreSQL (default, through `sqlx`)
//! - SQLite (file-based or in-memory, through `r2d2` + `rusqlite`)

use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use r2d2_sqlite::SqliteConnectionManager;
use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;
use tracing::info;

use super::migrations::{run_postgres_migrations, run_sqlite_migrations};

/// Path used when `DB_SQLITE_PATH` selects an in-memory database
pub const SQLITE_IN_MEMORY: &str = ":memory:";

/// Environment variables that compose a PostgreSQL connection URI
const POSTGRES_ENV_VARS: [&str; 5] = [
    "POSTGRES_USER",
    "POSTGRES_PASSWORD",
    "POSTGRES_DB",
    "PG_HOST",
    "PG_PORT",
];

/// Supported database types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    /// PostgreSQL database
    PostgreSQL,
    /// SQLite database (file-based or in-memory)
    Sqlite,
}

impl FromStr for DatabaseType {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgresql" | "postgres" => Ok(DatabaseType::PostgreSQL),
            "sqlite" => Ok(DatabaseType::Sqlite),
            _ => Err(DatabaseError::UnsupportedDatabaseType(s.to_string())),
        }
    }
}

/// Database connection pool enum for different database types
#[derive(Clone)]
pub enum DatabasePool {
    /// PostgreSQL connection pool
    PostgreSQL(PgPool),

    /// SQLite connection pool
    Sqlite(Arc<r2d2::Pool<SqliteConnectionManager>>),
}

impl fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabasePool::PostgreSQL(pool) => f
                .debug_struct("PostgreSQL")
                .field("size", &pool.size())
                .field("idle", &pool.num_idle())
                .finish(),
            DatabasePool::Sqlite(pool) => {
                let state = pool.state();
                f.debug_struct("Sqlite")
                    .field("connections", &state.connections)
                    .field("idle", &state.idle_connections)
                    .finish()
            }
        }
    }
}

impl DatabasePool {
    /// The backend this pool talks to
    pub fn database_type(&self) -> DatabaseType {
        match self {
            DatabasePool::PostgreSQL(_) => DatabaseType::PostgreSQL,
            DatabasePool::Sqlite(_) => DatabaseType::Sqlite,
        }
    }

    /// Close the pool. Outstanding connections are released as they are returned.
    pub async fn close(&self) {
        info!("Closing database connection");
        match self {
            DatabasePool::PostgreSQL(pool) => pool.close().await,
            // r2d2 closes its connections when the last handle is dropped
            DatabasePool::Sqlite(_) => {}
        }
    }

    /// Short human-readable description of the pool state
    pub fn connection_info(&self) -> String {
        match self {
            DatabasePool::PostgreSQL(pool) => format!(
                "PostgreSQL database (connections: size={}, idle={})",
                pool.size(),
                pool.num_idle()
            ),
            DatabasePool::Sqlite(pool) => {
                let state = pool.state();
                format!(
                    "SQLite database (connections: active={}, idle={})",
                    state.connections, state.idle_connections
                )
            }
        }
    }
}

/// Database error
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Required environment variables are missing
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingEnvVars(Vec<String>),

    /// An environment variable holds a value that cannot be used
    #[error("Invalid value for {name}: {value}")]
    InvalidEnvVar { name: String, value: String },

    /// Unsupported database type
    #[error("Unsupported database type: {0}")]
    UnsupportedDatabaseType(String),

    /// SQLite connection pool error
    #[error("SQLite connection pool error: {0}")]
    SqlitePoolError(#[from] r2d2::Error),

    /// PostgreSQL error
    #[error("PostgreSQL error: {0}")]
    PostgresError(#[from] sqlx::Error),

    /// Migration error
    #[error("Database migration error: {0}")]
    MigrationError(String),

    /// Generic database error
    #[error("Database error: {0}")]
    GenericError(String),
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Database type (postgres, sqlite)
    pub db_type: DatabaseType,
    /// Connection string for PostgreSQL
    pub connection_string: Option<String>,
    /// Path to SQLite database file, or `:memory:`
    pub sqlite_path: Option<String>,
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// Connection acquire timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: DatabaseType::PostgreSQL,
            connection_string: None,
            sqlite_path: None,
            max_connections: 10,
            timeout_seconds: 30,
        }
    }
}

impl DatabaseConfig {
    /// Configuration for a PostgreSQL database at `url`
    pub fn postgres(url: impl Into<String>) -> Self {
        Self {
            db_type: DatabaseType::PostgreSQL,
            connection_string: Some(url.into()),
            ..Self::default()
        }
    }

    /// Configuration for a private in-memory SQLite database
    pub fn in_memory() -> Self {
        Self {
            db_type: DatabaseType::Sqlite,
            sqlite_path: Some(SQLITE_IN_MEMORY.to_string()),
            ..Self::default()
        }
    }

    /// Create a new database configuration from environment variables
    pub fn from_env() -> Result<Self, DatabaseError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DatabaseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let db_type_str = var("DB_TYPE").unwrap_or_else(|| "postgres".to_string());
        let db_type = db_type_str.parse::<DatabaseType>()?;

        let mut config = DatabaseConfig {
            db_type,
            ..DatabaseConfig::default()
        };

        match db_type {
            DatabaseType::PostgreSQL => {
                config.connection_string = match var("DB_CONNECTION") {
                    Some(url) => Some(url),
                    None => {
                        let missing: Vec<String> = POSTGRES_ENV_VARS
                            .iter()
                            .filter(|&&name| var(name).is_none())
                            .map(|name| name.to_string())
                            .collect();
                        if !missing.is_empty() {
                            return Err(DatabaseError::MissingEnvVars(missing));
                        }

                        let port_str = var("PG_PORT").unwrap_or_default();
                        let port = port_str.parse::<u16>().map_err(|_| DatabaseError::InvalidEnvVar {
                            name: "PG_PORT".to_string(),
                            value: port_str.clone(),
                        })?;

                        Some(connection_uri(
                            &var("PG_HOST").unwrap_or_default(),
                            port,
                            &var("POSTGRES_USER").unwrap_or_default(),
                            &var("POSTGRES_PASSWORD").unwrap_or_default(),
                            &var("POSTGRES_DB").unwrap_or_default(),
                        ))
                    }
                };
                info!("Using PostgreSQL database");
            }
            DatabaseType::Sqlite => {
                let path = var("DB_SQLITE_PATH").unwrap_or_else(|| "data/health_points.db".to_string());
                info!("Using SQLite database at: {}", path);
                config.sqlite_path = Some(path);
            }
        }

        if let Some(value) = var("DB_MAX_CONNECTIONS") {
            config.max_connections = value
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(DatabaseError::InvalidEnvVar {
                    name: "DB_MAX_CONNECTIONS".to_string(),
                    value,
                })?;
        }

        if let Some(value) = var("DB_TIMEOUT_SECONDS") {
            config.timeout_seconds = value.parse::<u64>().map_err(|_| DatabaseError::InvalidEnvVar {
                name: "DB_TIMEOUT_SECONDS".to_string(),
                value: value.clone(),
            })?;
        }

        info!(
            "Database configuration: max_connections={}, timeout={}s",
            config.max_connections, config.timeout_seconds
        );

        Ok(config)
    }

    fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Compose a PostgreSQL connection URI from its parts
pub fn connection_uri(host: &str, port: u16, user: &str, password: &str, database: &str) -> String {
    format!(
        "postgres://{}:{}@{}:{}/{}?sslmode=disable",
        user, password, host, port, database
    )
}

/// Initialize the database connection pool and run migrations.
///
/// Any error here is meant to be fatal for the caller: the schema is
/// guaranteed to exist once this returns `Ok`.
pub async fn initialize_database_pool(config: &DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    info!("Initializing database pool with type: {:?}", config.db_type);

    let pool = match config.db_type {
        DatabaseType::PostgreSQL => initialize_postgres_pool(config).await?,
        DatabaseType::Sqlite => initialize_sqlite_pool(config)?,
    };

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Initialize PostgreSQL connection pool
async fn initialize_postgres_pool(config: &DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    let connection_string = config
        .connection_string
        .as_deref()
        .ok_or_else(|| DatabaseError::MissingEnvVars(vec!["DB_CONNECTION".to_string()]))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(connection_string)
        .await?;

    info!("PostgreSQL connection pool created successfully");
    Ok(DatabasePool::PostgreSQL(pool))
}

/// Initialize SQLite connection pool
fn initialize_sqlite_pool(config: &DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    use std::fs;
    use std::path::Path;

    let sqlite_path = config
        .sqlite_path
        .clone()
        .unwrap_or_else(|| "data/health_points.db".to_string());

    if sqlite_path == SQLITE_IN_MEMORY {
        return initialize_in_memory_sqlite_pool(config);
    }

    info!("Initializing SQLite database at: {}", sqlite_path);

    if let Some(parent) = Path::new(&sqlite_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating parent directory: {:?}", parent);
            fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::GenericError(format!("Failed to create directory {:?}: {}", parent, e))
            })?;
        }
    }

    let manager = SqliteConnectionManager::file(&sqlite_path);

    let pool = r2d2::Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(config.acquire_timeout())
        .build(manager)?;

    info!("SQLite connection pool created successfully");
    Ok(DatabasePool::Sqlite(Arc::new(pool)))
}

/// Initialize an in-memory SQLite database.
///
/// Every SQLite in-memory connection is its own database, so the pool is
/// capped at a single connection.
fn initialize_in_memory_sqlite_pool(config: &DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    info!("Initializing in-memory SQLite database");

    let manager = SqliteConnectionManager::memory();

    let pool = r2d2::Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connection_timeout(config.acquire_timeout())
        .build(manager)?;

    Ok(DatabasePool::Sqlite(Arc::new(pool)))
}

/// Run database migrations for whichever backend the pool points at
async fn run_migrations(pool: &DatabasePool) -> Result<(), DatabaseError> {
    info!("Running database migrations");

    match pool {
        DatabasePool::PostgreSQL(pool) => {
            run_postgres_migrations(pool)
                .await
                .map_err(DatabaseError::MigrationError)?;
        }
        DatabasePool::Sqlite(pool) => {
            let conn = pool.get()?;
            run_sqlite_migrations(&conn).map_err(DatabaseError::MigrationError)?;
        }
    }

    info!("Done with database migrations");
    Ok(())
}
