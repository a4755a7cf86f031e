// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory key-value store.

use crate::db::KeyValueStore;
use crate::error::Result;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory store. Clones share the same underlying map, so a test can keep
/// a handle and observe what the application persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let observer = store.clone();

        store.set("workouts", "[]").unwrap();
        assert_eq!(observer.get("workouts").unwrap().as_deref(), Some("[]"));

        store.remove("workouts").unwrap();
        assert_eq!(observer.get("workouts").unwrap(), None);
        // Removing again is fine
        store.remove("workouts").unwrap();
    }
}
