use sqlx::PgPool;
use tracing::info;

/// Run PostgreSQL database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), String> {
    info!("Running PostgreSQL migrations");

    create_health_data_table(pool).await?;
    create_health_data_index(pool).await?;

    info!("PostgreSQL migrations completed successfully");
    Ok(())
}

/// Create the health data table
async fn create_health_data_table(pool: &PgPool) -> Result<(), String> {
    info!("Creating health_data table if not exists");

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS health_data (
            id BIGSERIAL PRIMARY KEY,
            timestamp TIMESTAMPTZ NOT NULL,
            measurement TEXT NOT NULL,
            value DOUBLE PRECISION NOT NULL,
            unit TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| format!("Failed to create health_data table: {}", e))?;

    Ok(())
}

/// Create index on measurement for the filtered listing
async fn create_health_data_index(pool: &PgPool) -> Result<(), String> {
    info!("Creating index on measurement");

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_health_data_measurement
        ON health_data (measurement)",
    )
    .execute(pool)
    .await
    .map_err(|e| format!("Failed to create index: {}", e))?;

    Ok(())
}
