// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage layer: an opaque string-keyed value store.
//!
//! The workout collection is persisted as one JSON string under a single key;
//! nothing above this layer knows whether that lands in memory or on disk.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// Key names as constants.
pub mod keys {
    /// Default key holding the serialized workout collection.
    pub const WORKOUTS: &str = "workouts";

    /// Longest key accepted by every backend.
    pub const MAX_LEN: usize = 64;

    /// Whether `key` is usable with every store: 1 to 64 ASCII letters,
    /// digits, `-` or `_`.
    pub fn is_valid(key: &str) -> bool {
        !key.is_empty()
            && key.len() <= MAX_LEN
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

/// A string-keyed store of string values.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Deleting an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
