// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! View-models: what a marker popup and a list entry show for a workout.
//!
//! These are pure functions of a [`WorkoutRecord`]; the map canvas and the
//! list panel only ever store the results.

use crate::models::form::FormView;
use crate::models::workout::{WorkoutDetails, WorkoutKind, WorkoutRecord};
use crate::time_utils::format_utc_rfc3339;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Popup bound to a workout's map marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MarkerPopup {
    /// CSS class, e.g. "running-popup".
    pub class_name: String,
    /// Kind icon followed by the workout label.
    pub content: String,
}

impl From<&WorkoutRecord> for MarkerPopup {
    fn from(record: &WorkoutRecord) -> Self {
        let kind = record.kind();
        Self {
            class_name: format!("{}-popup", kind.as_str()),
            content: format!("{} {}", kind.icon(), record.label()),
        }
    }
}

/// One icon/value/unit row in a list entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MetricRow {
    pub icon: String,
    pub value: String,
    pub unit: String,
}

impl MetricRow {
    fn new(icon: &str, value: String, unit: &str) -> Self {
        Self {
            icon: icon.to_string(),
            value,
            unit: unit.to_string(),
        }
    }
}

/// A workout entry in the sidebar list, keyed by `id` (the `data-id`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutListItem {
    pub id: String,
    pub kind: WorkoutKind,
    pub class_name: String,
    pub title: String,
    pub created_at: String,
    /// Distance, duration, derived metric, then the kind-specific value.
    pub rows: Vec<MetricRow>,
    pub interaction_count: u32,
}

impl From<&WorkoutRecord> for WorkoutListItem {
    fn from(record: &WorkoutRecord) -> Self {
        let kind = record.kind();
        let mut rows = vec![
            MetricRow::new(kind.icon(), record.distance_km().to_string(), "km"),
            MetricRow::new("⏱", record.duration_min().to_string(), "min"),
        ];

        match *record.details() {
            WorkoutDetails::Running {
                cadence_spm,
                pace_min_per_km,
            } => {
                rows.push(MetricRow::new(
                    "⚡️",
                    format!("{:.1}", pace_min_per_km),
                    "min/km",
                ));
                rows.push(MetricRow::new("🦶🏼", cadence_spm.to_string(), "spm"));
            }
            WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            } => {
                rows.push(MetricRow::new(
                    "⚡️",
                    format!("{:.1}", speed_km_per_h),
                    "km/h",
                ));
                rows.push(MetricRow::new("⛰", elevation_gain_m.to_string(), "m"));
            }
        }

        Self {
            id: record.id().to_string(),
            kind,
            class_name: format!("workout workout--{}", kind.as_str()),
            title: record.label().to_string(),
            created_at: format_utc_rfc3339(record.created_at()),
            rows,
            interaction_count: record.interaction_count(),
        }
    }
}

/// A rendered marker, joined back to its workout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MarkerView {
    pub workout_id: String,
    pub coordinates: [f64; 2],
    pub popup: MarkerPopup,
    pub popup_open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: u8,
    /// Markers in creation order.
    pub markers: Vec<MarkerView>,
}

/// Everything a client needs to draw the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ViewSnapshot {
    /// "pending", "ready" or "unavailable".
    pub map_status: String,
    pub map: Option<MapView>,
    /// List entries in on-screen order (newest first).
    pub list: Vec<WorkoutListItem>,
    pub form: Option<FormView>,
    /// Pending user-visible message, if any.
    pub message: Option<String>,
}
