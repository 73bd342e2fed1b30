use rusqlite::Connection;
use tracing::info;

/// Run SQLite migrations
pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    info!("Running SQLite migrations");

    create_health_data_table(conn)?;
    create_health_data_index(conn)?;

    info!("SQLite migrations completed successfully");
    Ok(())
}

/// Create the health data table
fn create_health_data_table(conn: &Connection) -> Result<(), String> {
    info!("Creating health_data table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS health_data (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            measurement TEXT NOT NULL,
            value REAL NOT NULL,
            unit TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| format!("Failed to create health_data table: {}", e))?;

    Ok(())
}

/// Create index on measurement for the filtered listing
fn create_health_data_index(conn: &Connection) -> Result<(), String> {
    info!("Creating index on measurement");

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_health_data_measurement
        ON health_data (measurement)",
        [],
    )
    .map_err(|e| format!("Failed to create index: {}", e))?;

    Ok(())
}
