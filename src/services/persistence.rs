// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Saves and loads the workout collection as a JSON array under one key.

use crate::db::KeyValueStore;
use crate::error::{AppError, Result};
use crate::models::WorkoutRecord;
use serde_json::Value;

/// Serializes the full collection to a string store.
pub struct PersistenceAdapter {
    storage: Box<dyn KeyValueStore>,
    key: String,
}

/// Raw records read back from storage, plus what went wrong if anything did.
///
/// Turning the raw values into typed records is left to
/// [`WorkoutStore::replace_all`](crate::services::WorkoutStore::replace_all).
#[derive(Debug, Default)]
pub struct LoadedWorkouts {
    pub raw: Vec<Value>,
    pub diagnostic: Option<AppError>,
}

impl PersistenceAdapter {
    pub fn new<S: KeyValueStore + 'static>(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage: Box::new(storage),
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Overwrite the stored value with `records`.
    pub fn save(&self, records: &[WorkoutRecord]) -> Result<()> {
        let payload = serde_json::to_string(records)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Serialize workouts: {}", e)))?;
        self.storage.set(&self.key, &payload)?;
        tracing::debug!(key = %self.key, count = records.len(), "Workouts saved");
        Ok(())
    }

    /// Read the stored array. Never fails: an absent key is an empty
    /// collection, and an unreadable payload is an empty collection plus a
    /// diagnostic.
    pub fn load(&self) -> LoadedWorkouts {
        let payload = match self.storage.get(&self.key) {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                tracing::debug!(key = %self.key, "No saved workouts");
                return LoadedWorkouts::default();
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read saved workouts");
                return LoadedWorkouts {
                    raw: Vec::new(),
                    diagnostic: Some(e),
                };
            }
        };

        match serde_json::from_str::<Vec<Value>>(&payload) {
            Ok(raw) => {
                tracing::debug!(key = %self.key, count = raw.len(), "Loaded saved workouts");
                LoadedWorkouts {
                    raw,
                    diagnostic: None,
                }
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Discarding corrupt workout payload");
                LoadedWorkouts {
                    raw: Vec::new(),
                    diagnostic: Some(AppError::PersistenceCorrupt(e.to_string())),
                }
            }
        }
    }

    /// Delete the stored value entirely.
    pub fn clear(&self) -> Result<()> {
        self.storage.remove(&self.key)?;
        tracing::info!(key = %self.key, "Saved workouts cleared");
        Ok(())
    }
}
