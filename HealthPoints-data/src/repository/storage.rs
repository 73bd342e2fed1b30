use std::sync::Arc;

use chrono::{DateTime, Utc};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use tracing::debug;

use crate::database::DatabasePool;
use crate::models::{DataPointRecord, NewDataPointRecord};
use super::errors::RepositoryError;

type SqlitePool = Arc<r2d2::Pool<SqliteConnectionManager>>;

/// Database storage operations for data points
pub struct DatabaseStorage;

impl DatabaseStorage {
    /// Append a data point and return the stored row
    pub async fn insert(
        pool: &DatabasePool,
        point: NewDataPointRecord,
        timestamp: DateTime<Utc>,
    ) -> Result<DataPointRecord, RepositoryError> {
        debug!(
            "Storing data point in database: measurement={}, unit={}",
            point.measurement, point.unit
        );

        match pool {
            DatabasePool::PostgreSQL(pool) => {
                let record = sqlx::query_as::<_, DataPointRecord>(
                    "INSERT INTO health_data (timestamp, measurement, value, unit)
                     VALUES ($1, $2, $3, $4)
                     RETURNING id, timestamp, measurement, value, unit",
                )
                .bind(timestamp)
                .bind(&point.measurement)
                .bind(point.value)
                .bind(&point.unit)
                .fetch_one(pool)
                .await?;

                Ok(record)
            }

            DatabasePool::Sqlite(pool) => {
                let pool = Arc::clone(pool);
                tokio::task::spawn_blocking(move || sqlite_insert(&pool, point, timestamp)).await?
            }
        }
    }

    /// Get every data point for a measurement kind, in insertion order
    pub async fn list_by_measurement(
        pool: &DatabasePool,
        measurement: &str,
    ) -> Result<Vec<DataPointRecord>, RepositoryError> {
        debug!("Getting data points from database: measurement={}", measurement);

        match pool {
            DatabasePool::PostgreSQL(pool) => {
                let records = sqlx::query_as::<_, DataPointRecord>(
                    "SELECT id, timestamp, measurement, value, unit
                     FROM health_data
                     WHERE measurement = $1
                     ORDER BY id ASC",
                )
                .bind(measurement)
                .fetch_all(pool)
                .await?;

                Ok(records)
            }

            DatabasePool::Sqlite(pool) => {
                let pool = Arc::clone(pool);
                let measurement = measurement.to_string();
                tokio::task::spawn_blocking(move || sqlite_list_by_measurement(&pool, &measurement)).await?
            }
        }
    }

    /// Round-trip a trivial query to check the database is reachable
    pub async fn ping(pool: &DatabasePool) -> Result<(), RepositoryError> {
        match pool {
            DatabasePool::PostgreSQL(pool) => {
                sqlx::query("SELECT 1").execute(pool).await?;
                Ok(())
            }

            DatabasePool::Sqlite(pool) => {
                let pool = Arc::clone(pool);
                tokio::task::spawn_blocking(move || -> Result<(), RepositoryError> {
                    let conn = pool.get()?;
                    conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
                    Ok(())
                })
                .await?
            }
        }
    }
}

fn sqlite_insert(
    pool: &SqlitePool,
    point: NewDataPointRecord,
    timestamp: DateTime<Utc>,
) -> Result<DataPointRecord, RepositoryError> {
    let conn = pool.get()?;

    conn.execute(
        "INSERT INTO health_data (timestamp, measurement, value, unit)
         VALUES (?1, ?2, ?3, ?4)",
        params![timestamp, point.measurement, point.value, point.unit],
    )?;

    Ok(DataPointRecord {
        id: conn.last_insert_rowid(),
        timestamp,
        measurement: point.measurement,
        value: point.value,
        unit: point.unit,
    })
}

fn sqlite_list_by_measurement(
    pool: &SqlitePool,
    measurement: &str,
) -> Result<Vec<DataPointRecord>, RepositoryError> {
    let conn = pool.get()?;

    let mut stmt = conn.prepare(
        "SELECT id, timestamp, measurement, value, unit
         FROM health_data
         WHERE measurement = ?1
         ORDER BY id ASC",
    )?;

    let records = stmt.query_map([measurement], |row| {
        Ok(DataPointRecord {
            id: row.get(0)?,
            timestamp: row.get(1)?,
            measurement: row.get(2)?,
            value: row.get(3)?,
            unit: row.get(4)?,
        })
    })?;

    let mut result = Vec::new();
    for record in records {
        result.push(record?);
    }

    Ok(result)
}
