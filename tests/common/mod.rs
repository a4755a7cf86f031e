// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use workout_map_tracker::config::Config;
use workout_map_tracker::db::{keys, KeyValueStore, MemoryStore};
use workout_map_tracker::models::{Coordinates, FormSubmission, WorkoutKind};
use workout_map_tracker::routes::create_router;
use workout_map_tracker::services::{
    InteractionController, PersistenceAdapter, ViewSynchronizer, WorkoutList,
};
use workout_map_tracker::AppState;

/// Controller over `storage`, hydrated, with no position reported yet.
#[allow(dead_code)]
pub fn controller_pending<S: KeyValueStore + 'static>(storage: S) -> InteractionController {
    let persistence = PersistenceAdapter::new(storage, keys::WORKOUTS);
    let view = ViewSynchronizer::new(WorkoutList::new(), 13);
    let mut controller = InteractionController::new(persistence, view);
    controller.hydrate();
    controller
}

/// Controller over `storage`, hydrated, with the map centered at the origin.
#[allow(dead_code)]
pub fn controller_ready<S: KeyValueStore + 'static>(storage: S) -> InteractionController {
    let mut controller = controller_pending(storage);
    controller
        .on_position(Ok(Coordinates::new(0.0, 0.0)))
        .expect("Position should be accepted");
    controller
}

#[allow(dead_code)]
pub fn running(distance: &str, duration: &str, cadence: &str) -> FormSubmission {
    FormSubmission {
        kind: WorkoutKind::Running,
        distance: distance.to_string(),
        duration: duration.to_string(),
        cadence: cadence.to_string(),
        elevation: String::new(),
    }
}

#[allow(dead_code)]
pub fn cycling(distance: &str, duration: &str, elevation: &str) -> FormSubmission {
    FormSubmission {
        kind: WorkoutKind::Cycling,
        distance: distance.to_string(),
        duration: duration.to_string(),
        cadence: String::new(),
        elevation: elevation.to_string(),
    }
}

/// Create a test app over an in-memory store with the map ready.
/// Returns the router, the shared state and a handle on the store.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>, MemoryStore) {
    let storage = MemoryStore::new();
    let controller = controller_ready(storage.clone());
    let state = Arc::new(AppState::new(Config::default(), controller));
    (create_router(state.clone()), state, storage)
}

/// Send a request with an optional JSON body and decode the JSON response.
#[allow(dead_code)]
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
