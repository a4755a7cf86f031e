// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout form state and submitted form fields.

use crate::error::{AppError, Result};
use crate::models::workout::{Coordinates, WorkoutId, WorkoutInput, WorkoutKind, WorkoutRecord};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Raw form fields as typed by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FormSubmission {
    pub kind: WorkoutKind,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub duration: String,
    /// Only read for running workouts.
    #[serde(default)]
    pub cadence: String,
    /// Only read for cycling workouts.
    #[serde(default)]
    pub elevation: String,
}

impl FormSubmission {
    /// Parse and validate the fields relevant to the selected kind.
    pub fn to_input(&self) -> Result<WorkoutInput> {
        let distance_km = parse_field("distance", &self.distance)?;
        let duration_min = parse_field("duration", &self.duration)?;

        let input = match self.kind {
            WorkoutKind::Running => WorkoutInput::Running {
                distance_km,
                duration_min,
                cadence_spm: parse_field("cadence", &self.cadence)?,
            },
            WorkoutKind::Cycling => WorkoutInput::Cycling {
                distance_km,
                duration_min,
                elevation_gain_m: parse_field("elevation", &self.elevation)?,
            },
        };

        input.validate()?;
        Ok(input)
    }
}

fn parse_field(name: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| AppError::InvalidInput(format!("{} is not a number: {:?}", name, raw)))
}

/// The text currently shown in the form inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FormFields {
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

impl FormFields {
    /// Pre-fill from an existing workout; the other kind's field stays blank.
    pub fn from_input(input: &WorkoutInput) -> Self {
        match *input {
            WorkoutInput::Running {
                distance_km,
                duration_min,
                cadence_spm,
            } => Self {
                distance: distance_km.to_string(),
                duration: duration_min.to_string(),
                cadence: cadence_spm.to_string(),
                elevation: String::new(),
            },
            WorkoutInput::Cycling {
                distance_km,
                duration_min,
                elevation_gain_m,
            } => Self {
                distance: distance_km.to_string(),
                duration: duration_min.to_string(),
                cadence: String::new(),
                elevation: elevation_gain_m.to_string(),
            },
        }
    }
}

/// Which kind-dependent input row is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum VisibleField {
    Cadence,
    Elevation,
}

impl From<WorkoutKind> for VisibleField {
    fn from(kind: WorkoutKind) -> Self {
        match kind {
            WorkoutKind::Running => VisibleField::Cadence,
            WorkoutKind::Cycling => VisibleField::Elevation,
        }
    }
}

/// Whether a submit creates a new workout or revises an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(WorkoutId),
}

/// An open form: the buffered map location plus what the user has entered.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSession {
    pub location: Coordinates,
    pub mode: FormMode,
    pub kind: WorkoutKind,
    pub fields: FormFields,
}

impl FormSession {
    /// Blank form for a new workout at `location`.
    pub fn create(location: Coordinates) -> Self {
        Self {
            location,
            mode: FormMode::Create,
            kind: WorkoutKind::Running,
            fields: FormFields::default(),
        }
    }

    /// Form pre-populated from `record` for editing.
    pub fn edit(record: &WorkoutRecord) -> Self {
        Self {
            location: record.coordinates(),
            mode: FormMode::Edit(record.id().clone()),
            kind: record.kind(),
            fields: FormFields::from_input(&record.to_input()),
        }
    }

    pub fn select_kind(&mut self, kind: WorkoutKind) {
        self.kind = kind;
    }

    pub fn view(&self) -> FormView {
        FormView {
            editing: match &self.mode {
                FormMode::Create => None,
                FormMode::Edit(id) => Some(id.to_string()),
            },
            kind: self.kind,
            location: self.location.into(),
            fields: self.fields.clone(),
            visible_field: self.kind.into(),
        }
    }
}

/// Serializable form state for clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FormView {
    /// Id of the workout being edited, absent when creating.
    pub editing: Option<String>,
    pub kind: WorkoutKind,
    pub location: [f64; 2],
    pub fields: FormFields,
    pub visible_field: VisibleField,
}
