// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interaction controller: turns user gestures into state transitions.
//!
//! Every transition that changes the collection follows the same order:
//! 1. Validate input and build the record
//! 2. Mutate the store
//! 3. Save the full snapshot (restoring the store if the save fails)
//! 4. Apply the visual delta
//!
//! Invalid input stops at step 1, so store, storage and views are untouched.

use crate::error::{AppError, Result};
use crate::models::{
    Coordinates, FormMode, FormSession, FormSubmission, ViewSnapshot, WorkoutId, WorkoutInput,
    WorkoutKind, WorkoutRecord,
};
use crate::services::persistence::PersistenceAdapter;
use crate::services::store::{HydrationReport, WorkoutStore};
use crate::services::view::ViewSynchronizer;

/// Map initialization state, driven by the one-shot positioning result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapStatus {
    /// Waiting for the position.
    Pending,
    Ready,
    /// Positioning failed; the map will never initialize.
    Unavailable(String),
}

impl MapStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapStatus::Pending => "pending",
            MapStatus::Ready => "ready",
            MapStatus::Unavailable(_) => "unavailable",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Idle,
    FormOpen(FormSession),
}

pub struct InteractionController {
    store: WorkoutStore,
    persistence: PersistenceAdapter,
    view: ViewSynchronizer,
    mode: Mode,
    map_status: MapStatus,
    message: Option<String>,
}

impl InteractionController {
    pub fn new(persistence: PersistenceAdapter, view: ViewSynchronizer) -> Self {
        Self {
            store: WorkoutStore::new(),
            persistence,
            view,
            mode: Mode::Idle,
            map_status: MapStatus::Pending,
            message: None,
        }
    }

    /// Load saved workouts into the store and render them.
    pub fn hydrate(&mut self) -> HydrationReport {
        let loaded = self.persistence.load();
        if let Some(diagnostic) = &loaded.diagnostic {
            tracing::warn!(error = %diagnostic, "Starting from an empty workout collection");
        }

        let report = self.store.replace_all(loaded.raw);
        self.view.clear();
        self.view.render_all(self.store.records());
        report
    }

    /// Deliver the positioning result. Only the first report counts.
    pub fn on_position(&mut self, position: Result<Coordinates>) -> Result<()> {
        if self.map_status != MapStatus::Pending {
            tracing::warn!(status = self.map_status.as_str(), "Ignoring late position report");
            return Err(AppError::BadRequest(format!(
                "Position already resolved (map {})",
                self.map_status.as_str()
            )));
        }

        match position {
            Ok(center) => {
                center.validate()?;
                self.view.init_map(center, self.store.records());
                self.map_status = MapStatus::Ready;
                tracing::info!(
                    lat = center.lat,
                    lng = center.lng,
                    markers = self.store.len(),
                    "Map initialized"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "Positioning failed, map disabled");
                self.map_status = MapStatus::Unavailable(e.to_string());
                self.message = Some(AppError::POSITION_MESSAGE.to_string());
            }
        }
        Ok(())
    }

    /// Idle/FormOpen + map click: open a blank form at the clicked location.
    pub fn map_click(&mut self, location: Coordinates) -> Result<()> {
        if self.map_status != MapStatus::Ready {
            return Err(AppError::PositioningUnavailable(
                "Map is not initialized".to_string(),
            ));
        }
        location.validate()?;

        self.mode = Mode::FormOpen(FormSession::create(location));
        self.message = None;
        tracing::debug!(lat = location.lat, lng = location.lng, "Form opened");
        Ok(())
    }

    /// Switch the open form between running and cycling.
    pub fn select_kind(&mut self, kind: WorkoutKind) -> Result<()> {
        match &mut self.mode {
            Mode::FormOpen(session) => {
                session.select_kind(kind);
                Ok(())
            }
            Mode::Idle => Err(AppError::BadRequest("No form is open".to_string())),
        }
    }

    /// Close the form without changing anything else.
    pub fn cancel(&mut self) {
        self.mode = Mode::Idle;
    }

    /// FormOpen + submit.
    ///
    /// Creates a workout, or in edit mode revises the edited one in place
    /// (same id, creation time and position in the list). On invalid input
    /// the form stays open and a message is set.
    pub fn submit(&mut self, submission: &FormSubmission) -> Result<WorkoutRecord> {
        let Mode::FormOpen(session) = &mut self.mode else {
            return Err(AppError::BadRequest("No form is open".to_string()));
        };

        // Keep what the user typed so a rejected form can be corrected
        session.kind = submission.kind;
        session.fields.distance = submission.distance.clone();
        session.fields.duration = submission.duration.clone();
        session.fields.cadence = submission.cadence.clone();
        session.fields.elevation = submission.elevation.clone();
        let location = session.location;
        let form_mode = session.mode.clone();

        let input = match submission.to_input() {
            Ok(input) => input,
            Err(e) => {
                tracing::debug!(error = %e, "Form rejected");
                self.message = Some(AppError::INVALID_INPUT_MESSAGE.to_string());
                return Err(e);
            }
        };

        let record = match form_mode {
            FormMode::Create => self.add_workout(input, location)?,
            FormMode::Edit(id) => self.update_workout(&id, &input)?,
        };

        self.mode = Mode::Idle;
        self.message = None;
        Ok(record)
    }

    fn add_workout(&mut self, input: WorkoutInput, location: Coordinates) -> Result<WorkoutRecord> {
        let record = WorkoutRecord::create(input, location)?;
        let before = self.store.snapshot();

        self.store.add(record.clone()).map_err(log_desync)?;
        self.commit(before)?;
        self.view.render_added(&record);

        tracing::info!(workout_id = %record.id(), kind = record.kind().as_str(), "Workout added");
        Ok(record)
    }

    fn update_workout(&mut self, id: &WorkoutId, input: &WorkoutInput) -> Result<WorkoutRecord> {
        let revised = self.store.find_by_id(id).map_err(log_desync)?.revise(input)?;
        let before = self.store.snapshot();

        self.store.update(revised.clone()).map_err(log_desync)?;
        self.commit(before)?;
        self.view.render_updated(&revised);

        tracing::info!(workout_id = %id, kind = revised.kind().as_str(), "Workout updated");
        Ok(revised)
    }

    /// Any state + delete-click.
    pub fn delete_click(&mut self, id: &WorkoutId) -> Result<WorkoutRecord> {
        let before = self.store.snapshot();

        let removed = self.store.remove_by_id(id).map_err(log_desync)?;
        self.commit(before)?;
        self.view.render_removed(id);
        self.mode = Mode::Idle;

        tracing::info!(workout_id = %id, "Workout deleted");
        Ok(removed)
    }

    /// Any state + edit-click: open the form pre-filled in edit mode.
    pub fn edit_click(&mut self, id: &WorkoutId) -> Result<()> {
        let record = self.store.find_by_id(id).map_err(log_desync)?;
        self.mode = Mode::FormOpen(FormSession::edit(record));
        self.message = None;
        tracing::debug!(workout_id = %id, "Editing workout");
        Ok(())
    }

    /// List entry click: count the visit and pan the map to the workout.
    pub fn list_click(&mut self, id: &WorkoutId) -> Result<WorkoutRecord> {
        let record = self
            .store
            .record_interaction(id)
            .map_err(log_desync)?
            .clone();

        // The counter is cosmetic; a failed save does not undo the focus
        if let Err(e) = self.persistence.save(self.store.records()) {
            tracing::warn!(workout_id = %id, error = %e, "Failed to save interaction count");
        }
        self.view.render_updated(&record);
        if !self.view.focus_on(&record) {
            tracing::debug!(workout_id = %id, "No map to focus");
        }
        Ok(record)
    }

    /// Delete every workout, including the saved copy.
    pub fn reset(&mut self) -> Result<()> {
        self.persistence.clear()?;
        let count = self.store.len();
        self.store.clear();
        self.view.clear();
        self.mode = Mode::Idle;
        tracing::info!(count, "All workouts deleted");
        Ok(())
    }

    pub fn dismiss_message(&mut self) {
        self.message = None;
    }

    /// Save the current collection, or roll the store back to `before`.
    fn commit(&mut self, before: Vec<WorkoutRecord>) -> Result<()> {
        if let Err(e) = self.persistence.save(self.store.records()) {
            tracing::error!(error = %e, "Save failed, rolling back");
            self.store.restore(before);
            return Err(e);
        }
        Ok(())
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            map_status: self.map_status.as_str().to_string(),
            map: self.view.map_view(),
            list: self.view.list_items(),
            form: match &self.mode {
                Mode::FormOpen(session) => Some(session.view()),
                Mode::Idle => None,
            },
            message: self.message.clone(),
        }
    }

    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }

    pub fn view(&self) -> &ViewSynchronizer {
        &self.view
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn map_status(&self) -> &MapStatus {
        &self.map_status
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Log view/state desync errors before they are returned.
fn log_desync(e: AppError) -> AppError {
    if matches!(e, AppError::NotFound(_) | AppError::DuplicateId(_)) {
        tracing::warn!(error = %e, "Workout state out of sync with the view");
    }
    e
}
