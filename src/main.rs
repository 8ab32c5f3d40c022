// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Truck Tracker API Server
//!
//! Tracks garbage-truck fill state, destination and location, and manages
//! customer and administrator accounts.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use truck_tracker::{
    config::{Config, DatabaseBackend},
    db::Database,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        port = config.port,
        backend = ?config.database_backend,
        "Starting Truck Tracker API"
    );

    let db = open_database(&config).await;

    // Build shared state
    let state = Arc::new(AppState { db });

    // Build router
    let app = truck_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Open the configured database.
///
/// A failed Firestore connection is logged and the server keeps running
/// offline; each request then fails individually.
async fn open_database(config: &Config) -> Database {
    match config.database_backend {
        DatabaseBackend::Memory => {
            tracing::warn!("Using in-memory database; data is lost on restart");
            Database::in_memory()
        }
        DatabaseBackend::Firestore => match Database::connect(&config.gcp_project_id).await {
            Ok(db) => db,
            Err(e) => {
                tracing::error!(error = %e, "Database connection failed; running offline");
                Database::offline()
            }
        },
    }
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("truck_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
