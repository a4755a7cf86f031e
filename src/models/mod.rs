// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod form;
pub mod view;
pub mod workout;

pub use form::{FormFields, FormMode, FormSession, FormSubmission, FormView, VisibleField};
pub use view::{MapView, MarkerPopup, MarkerView, MetricRow, ViewSnapshot, WorkoutListItem};
pub use workout::{
    Coordinates, WorkoutDetails, WorkoutId, WorkoutInput, WorkoutKind, WorkoutRecord,
};
