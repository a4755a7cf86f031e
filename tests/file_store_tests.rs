// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistence through the file-backed store, across simulated restarts.

mod common;

use axum::http::{Method, StatusCode};
use common::{controller_pending, controller_ready, cycling, running, send};
use std::sync::Arc;
use tempfile::TempDir;
use workout_map_tracker::config::Config;
use workout_map_tracker::db::{keys, FileStore, KeyValueStore};
use workout_map_tracker::models::Coordinates;
use workout_map_tracker::routes::create_router;
use workout_map_tracker::AppState;

#[test]
fn test_workouts_survive_restart() {
    let dir = TempDir::new().unwrap();

    let (first, second) = {
        let mut controller = controller_ready(FileStore::open(dir.path()).unwrap());
        controller.map_click(Coordinates::new(1.0, 1.0)).unwrap();
        let first = controller.submit(&running("5", "25", "180")).unwrap();
        controller.map_click(Coordinates::new(2.0, 2.0)).unwrap();
        let second = controller.submit(&cycling("20", "60", "300")).unwrap();
        (first, second)
    };

    assert!(dir.path().join("workouts.json").exists());

    let controller = controller_pending(FileStore::open(dir.path()).unwrap());
    assert_eq!(controller.store().records(), &[first, second]);
    assert_eq!(controller.view().list().len(), 2);
}

#[test]
fn test_reset_removes_file() {
    let dir = TempDir::new().unwrap();
    let mut controller = controller_ready(FileStore::open(dir.path()).unwrap());
    controller.map_click(Coordinates::new(1.0, 1.0)).unwrap();
    controller.submit(&running("5", "25", "180")).unwrap();

    controller.reset().unwrap();

    assert!(!dir.path().join("workouts.json").exists());
    let controller = controller_pending(FileStore::open(dir.path()).unwrap());
    assert!(controller.store().is_empty());
}

#[test]
fn test_corrupt_file_is_replaced_on_next_save() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("workouts.json"), "[{\"id\":").unwrap();

    let mut controller = controller_ready(FileStore::open(dir.path()).unwrap());
    assert!(controller.store().is_empty());

    controller.map_click(Coordinates::new(1.0, 1.0)).unwrap();
    let record = controller.submit(&running("5", "25", "180")).unwrap();

    let store = FileStore::open(dir.path()).unwrap();
    let payload = store.get(keys::WORKOUTS).unwrap().unwrap();
    let saved: Vec<serde_json::Value> = serde_json::from_str(&payload).unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0]["id"], record.id().as_str());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_each_persist() {
    let dir = TempDir::new().unwrap();
    let mut controller = controller_ready(FileStore::open(dir.path()).unwrap());
    controller.map_click(Coordinates::new(1.0, 1.0)).unwrap();
    let record = controller.submit(&running("5", "25", "180")).unwrap();

    let state = Arc::new(AppState::new(Config::default(), controller));
    let app = create_router(state);
    let uri = format!("/api/workouts/{}/focus", record.id());

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let app = app.clone();
            let uri = uri.clone();
            tokio::spawn(async move { send(&app, Method::POST, &uri, None).await })
        })
        .collect();
    for handle in handles {
        let (status, _) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    // Every click was saved before the next one ran
    let reloaded = controller_pending(FileStore::open(dir.path()).unwrap());
    assert_eq!(reloaded.store().records()[0].interaction_count(), 20);
}
