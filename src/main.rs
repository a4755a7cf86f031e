// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout map tracker server.
//!
//! Restores saved workouts, then serves the map/list state and accepts user
//! gestures over HTTP.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_map_tracker::{
    config::Config,
    db::FileStore,
    services::{InteractionController, PersistenceAdapter, ViewSynchronizer, WorkoutList},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting workout map tracker");

    // Open the file-backed store
    let storage = FileStore::open(&config.data_dir)?;
    let persistence = PersistenceAdapter::new(storage, config.storage_key.clone());

    // Restore saved workouts
    let view = ViewSynchronizer::new(WorkoutList::new(), config.map_zoom);
    let mut controller = InteractionController::new(persistence, view);
    let report = controller.hydrate();
    tracing::info!(
        accepted = report.accepted,
        discarded = report.discarded,
        "Saved workouts restored"
    );

    // A configured home position stands in for the client's geolocation
    if let Some(home) = config.home_position {
        controller.on_position(Ok(home))?;
    } else {
        tracing::info!("No HOME_LAT/HOME_LNG set, waiting for client position");
    }

    let state = Arc::new(AppState::new(config.clone(), controller));

    // Build router
    let app = workout_map_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("workout_map_tracker=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
