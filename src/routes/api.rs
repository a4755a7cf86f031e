// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes: one endpoint per user gesture, plus read-only view state.

use crate::error::{AppError, Result};
use crate::models::{
    Coordinates, FormSubmission, ViewSnapshot, WorkoutId, WorkoutKind, WorkoutRecord,
};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/view", get(get_view))
        .route("/api/markers.geojson", get(get_markers))
        .route("/api/workouts", get(get_workouts).delete(delete_all))
        .route("/api/workouts/{id}", delete(delete_workout))
        .route("/api/workouts/{id}/edit", post(edit_workout))
        .route("/api/workouts/{id}/focus", post(focus_workout))
        .route("/api/position", post(report_position))
        .route("/api/map/click", post(map_click))
        .route("/api/form/kind", post(select_kind))
        .route("/api/form/submit", post(submit_form))
        .route("/api/form/cancel", post(cancel_form))
        .route("/api/message", delete(dismiss_message))
}

// ─── Read-only state ─────────────────────────────────────────

/// Current map, list and form state.
async fn get_view(State(state): State<Arc<AppState>>) -> Json<ViewSnapshot> {
    Json(state.controller.lock().await.snapshot())
}

/// Marker layer as GeoJSON.
async fn get_markers(State(state): State<Arc<AppState>>) -> Json<FeatureCollection> {
    Json(state.controller.lock().await.view().markers_geojson())
}

/// All workouts in their saved shape, oldest first.
async fn get_workouts(State(state): State<Arc<AppState>>) -> Json<Vec<WorkoutRecord>> {
    Json(state.controller.lock().await.store().snapshot())
}

// ─── Positioning & map ───────────────────────────────────────

/// A latitude/longitude pair sent by the client.
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for Coordinates {
    fn from(value: LatLng) -> Self {
        Coordinates::new(value.lat, value.lng)
    }
}

/// Result of the client's geolocation request.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum PositionReport {
    Located { lat: f64, lng: f64 },
    Failed { error: String },
}

/// Deliver the one-shot positioning result.
async fn report_position(
    State(state): State<Arc<AppState>>,
    Json(report): Json<PositionReport>,
) -> Result<Json<ViewSnapshot>> {
    let position = match report {
        PositionReport::Located { lat, lng } => Ok(Coordinates::new(lat, lng)),
        PositionReport::Failed { error } => Err(AppError::PositioningUnavailable(error)),
    };

    let mut controller = state.controller.lock().await;
    controller.on_position(position)?;
    Ok(Json(controller.snapshot()))
}

/// Map click: open the form at the clicked point.
async fn map_click(
    State(state): State<Arc<AppState>>,
    Json(location): Json<LatLng>,
) -> Result<Json<ViewSnapshot>> {
    let mut controller = state.controller.lock().await;
    controller.map_click(location.into())?;
    Ok(Json(controller.snapshot()))
}

// ─── Form ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct KindRequest {
    kind: WorkoutKind,
}

/// Toggle the kind-dependent form field.
async fn select_kind(
    State(state): State<Arc<AppState>>,
    Json(request): Json<KindRequest>,
) -> Result<Json<ViewSnapshot>> {
    let mut controller = state.controller.lock().await;
    controller.select_kind(request.kind)?;
    Ok(Json(controller.snapshot()))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SubmitResponse {
    pub workout_id: String,
    pub view: ViewSnapshot,
}

/// Submit the open form (create, or save an edit).
async fn submit_form(
    State(state): State<Arc<AppState>>,
    Json(submission): Json<FormSubmission>,
) -> Result<Json<SubmitResponse>> {
    let mut controller = state.controller.lock().await;
    let record = controller.submit(&submission)?;

    Ok(Json(SubmitResponse {
        workout_id: record.id().to_string(),
        view: controller.snapshot(),
    }))
}

async fn cancel_form(State(state): State<Arc<AppState>>) -> Json<ViewSnapshot> {
    let mut controller = state.controller.lock().await;
    controller.cancel();
    Json(controller.snapshot())
}

async fn dismiss_message(State(state): State<Arc<AppState>>) -> Json<ViewSnapshot> {
    let mut controller = state.controller.lock().await;
    controller.dismiss_message();
    Json(controller.snapshot())
}

// ─── Workout actions ─────────────────────────────────────────

/// Delete button on a list entry.
async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ViewSnapshot>> {
    let mut controller = state.controller.lock().await;
    controller.delete_click(&WorkoutId::from(id))?;
    Ok(Json(controller.snapshot()))
}

/// Edit button on a list entry.
async fn edit_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ViewSnapshot>> {
    let mut controller = state.controller.lock().await;
    controller.edit_click(&WorkoutId::from(id))?;
    Ok(Json(controller.snapshot()))
}

/// Click on a list entry outside its buttons.
async fn focus_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ViewSnapshot>> {
    let mut controller = state.controller.lock().await;
    controller.list_click(&WorkoutId::from(id))?;
    Ok(Json(controller.snapshot()))
}

/// Delete every workout.
async fn delete_all(State(state): State<Arc<AppState>>) -> Result<Json<ViewSnapshot>> {
    tracing::info!("Deleting all workouts");
    let mut controller = state.controller.lock().await;
    controller.reset()?;
    Ok(Json(controller.snapshot()))
}
