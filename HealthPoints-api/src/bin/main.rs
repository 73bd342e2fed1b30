use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use health_points_api::{create_app, ServerConfig};
use health_points_data::database::{initialize_database_pool, DatabaseConfig};
use health_points_data::repository::DataPointRepository;
use health_points_domain::entities::MeasurementCatalog;
use health_points_domain::health::HealthService;
use health_points_domain::services::HealthDataService;

/// The main entry point for the HealthPoints API server
///
/// This function:
/// 1. Initializes environment variables from .env file
/// 2. Sets up tracing for logging
/// 3. Initializes the database connection pool and runs migrations
/// 4. Creates and starts the Axum web application
/// 5. Handles graceful shutdown and closes the pool
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    let dotenv_result = dotenv();

    // Initialize tracing for structured logging
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(false)
            .with_ansi(true)
            .with_timer(fmt::time::uptime())
            .with_writer(std::io::stdout))
        .with(env_filter)
        .init();

    if dotenv_result.is_err() {
        warn!(".env file not found or couldn't be read. Using environment variables.");
    }

    info!("Starting HealthPoints API server");

    let server_config = ServerConfig::from_env().context("invalid server configuration")?;
    let database_config = DatabaseConfig::from_env().context("invalid database configuration")?;

    let pool = match initialize_database_pool(&database_config).await {
        Ok(pool) => {
            info!("Database pool initialized: {}", pool.connection_info());
            pool
        }
        Err(e) => {
            error!("Failed to initialize database pool: {}", e);
            return Err(e).context("database initialization failed");
        }
    };

    let repository = DataPointRepository::new(pool.clone());
    let health_data_service = Arc::new(HealthDataService::new(
        repository.clone(),
        MeasurementCatalog::default(),
    ));
    let health_service = Arc::new(HealthService::new(repository));

    let app = create_app(health_data_service, health_service, &server_config);

    let address = server_config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    info!("Listening on {}", address);

    // Serve the application with graceful shutdown support
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    pool.close().await;

    served.context("server error")?;
    info!("Server shutdown complete");
    Ok(())
}

/// Wait for Ctrl+C or, on Unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down server...");
}
