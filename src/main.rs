//! Raffler Backend Service
//!
//! Main entry point for the Raffler backend.
//! This service provides:
//! - REST API for participants, events, and raffle draws
//! - SQLite persistence with migrations

use raffler_backend::api;
use raffler_backend::config::AppConfig;
use raffler_backend::database::{create_pool, run_migrations};
use raffler_backend::error::{AppError, AppResult};
use raffler_backend::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load environment variables first
    dotenv::dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        AppError::Config(e)
    })?;

    // Initialize tracing/logging with config
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "raffler_backend={},sqlx=warn,tower_http=info",
                    config.log_level
                )
                .into()
            }),
        )
        .init();

    info!("Raffler backend service starting");
    info!("Environment: {}", config.environment);
    info!("Log level: {}", config.log_level);

    // =========================================================================
    // DATABASE SETUP
    // =========================================================================
    info!("Connecting to database at {}...", config.database_path());

    let pool = create_pool(&config.database).await.map_err(|e| {
        error!("Failed to create database pool: {}", e);
        AppError::Database(e)
    })?;

    info!("Database connection pool created successfully");
    info!("Max connections: {}", config.database.max_connections);

    // Run migrations
    info!("Running database migrations...");
    run_migrations(&pool, None).await.map_err(|e| {
        error!("Database migration failed: {}", e);
        AppError::Database(e)
    })?;

    info!("Database migrations completed successfully");

    // =========================================================================
    // STATE AND ROUTER
    // =========================================================================
    let app_state = Arc::new(AppState::new(pool));
    info!("✓ Application state initialized with repositories");

    let app = api::router(app_state);
    info!("✓ HTTP router initialized");

    // =========================================================================
    // START SERVER
    // =========================================================================
    let addr: SocketAddr = format!("{}:{}", config.host, config.http_port)
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid bind address: {}", e)))?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Message(format!("Failed to bind HTTP server: {}", e)))?;

    info!("✓ Raffler API listening on http://{}", addr);
    info!("Press Ctrl+C to shutdown gracefully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Message(format!("HTTP server error: {}", e)))?;

    info!("Raffler backend service shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received, shutting down gracefully...");
}
