// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory workout collection.

use crate::error::{AppError, Result};
use crate::models::{WorkoutId, WorkoutKind, WorkoutRecord};
use serde_json::Value;
use std::collections::HashSet;

/// Ordered collection of workouts (oldest first) with unique ids.
///
/// This is the only owner of the collection; other components get copies
/// through [`WorkoutStore::snapshot`] or shared references.
#[derive(Debug, Default, Clone)]
pub struct WorkoutStore {
    records: Vec<WorkoutRecord>,
}

/// Outcome of hydrating the store from raw persisted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HydrationReport {
    pub accepted: usize,
    pub discarded: usize,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn add(&mut self, record: WorkoutRecord) -> Result<()> {
        if self.position(record.id()).is_some() {
            return Err(AppError::DuplicateId(record.id().to_string()));
        }
        self.records.push(record);
        Ok(())
    }

    /// First record with `id`.
    pub fn find_by_id(&self, id: &WorkoutId) -> Result<&WorkoutRecord> {
        self.position(id)
            .map(|index| &self.records[index])
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    /// Remove and return the record with `id`.
    pub fn remove_by_id(&mut self, id: &WorkoutId) -> Result<WorkoutRecord> {
        let index = self
            .position(id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        Ok(self.records.remove(index))
    }

    /// Replace the record sharing `record`'s id, keeping its position.
    /// Returns the previous version.
    pub fn update(&mut self, record: WorkoutRecord) -> Result<WorkoutRecord> {
        let index = self
            .position(record.id())
            .ok_or_else(|| AppError::NotFound(record.id().to_string()))?;
        Ok(std::mem::replace(&mut self.records[index], record))
    }

    /// Bump the interaction counter of the record with `id`.
    pub fn record_interaction(&mut self, id: &WorkoutId) -> Result<&WorkoutRecord> {
        let index = self
            .position(id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        let record = &mut self.records[index];
        record.record_interaction();
        Ok(record)
    }

    /// Replace the whole collection with records read back from storage.
    ///
    /// Entries that fail to decode or validate, or repeat an earlier id, are
    /// logged and skipped; they never fail the load as a whole.
    pub fn replace_all(&mut self, raw: Vec<Value>) -> HydrationReport {
        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(raw.len());
        let mut discarded = 0;

        for (index, value) in raw.into_iter().enumerate() {
            if let Some(key) = foreign_variant_key(&value) {
                tracing::warn!(index, key, "Discarding workout carrying the other kind's field");
                discarded += 1;
                continue;
            }

            let record = match serde_json::from_value::<WorkoutRecord>(value) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(index, error = %e, "Discarding undecodable workout");
                    discarded += 1;
                    continue;
                }
            };

            if let Err(e) = record.validate() {
                tracing::warn!(
                    index,
                    workout_id = %record.id(),
                    error = %e,
                    "Discarding invalid workout"
                );
                discarded += 1;
                continue;
            }

            if !seen.insert(record.id().clone()) {
                tracing::warn!(index, workout_id = %record.id(), "Discarding duplicate workout id");
                discarded += 1;
                continue;
            }

            records.push(record);
        }

        self.records = records;
        tracing::info!(
            accepted = self.records.len(),
            discarded,
            "Workout store hydrated"
        );

        HydrationReport {
            accepted: self.records.len(),
            discarded,
        }
    }

    /// Copy of the full collection, in insertion order.
    pub fn snapshot(&self) -> Vec<WorkoutRecord> {
        self.records.clone()
    }

    pub fn records(&self) -> &[WorkoutRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Put back a snapshot taken earlier by the same store.
    pub(crate) fn restore(&mut self, snapshot: Vec<WorkoutRecord>) {
        self.records = snapshot;
    }

    fn position(&self, id: &WorkoutId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }
}

/// The other kind's field, if a raw record carries it next to its own.
///
/// Decoding alone would drop it silently.
fn foreign_variant_key(value: &Value) -> Option<&'static str> {
    let kind: WorkoutKind = serde_json::from_value(value.get("kind")?.clone()).ok()?;
    let foreign = match kind {
        WorkoutKind::Running => WorkoutKind::Cycling,
        WorkoutKind::Cycling => WorkoutKind::Running,
    }
    .variant_key();
    value.get(foreign).map(|_| foreign)
}
