// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sidebar list of workout entries.

use crate::models::WorkoutListItem;
use std::collections::VecDeque;

/// The workout list as it appears on screen, top to bottom.
///
/// New entries go directly below the form, so the newest entry is first.
/// A list without a form anchor ignores every mutation.
#[derive(Debug, Clone)]
pub struct WorkoutList {
    anchored: bool,
    items: VecDeque<WorkoutListItem>,
}

impl Default for WorkoutList {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkoutList {
    pub fn new() -> Self {
        Self {
            anchored: true,
            items: VecDeque::new(),
        }
    }

    /// A list whose form anchor is missing.
    pub fn detached() -> Self {
        Self {
            anchored: false,
            items: VecDeque::new(),
        }
    }

    pub fn has_anchor(&self) -> bool {
        self.anchored
    }

    /// Insert right after the form. Returns false if there is no anchor.
    pub fn insert_after_form(&mut self, item: WorkoutListItem) -> bool {
        if !self.anchored {
            return false;
        }
        self.items.push_front(item);
        true
    }

    /// Swap the entry with the same id in place.
    pub fn replace(&mut self, item: WorkoutListItem) -> bool {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                *existing = item;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        match self.items.iter().position(|item| item.id == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, id: &str) -> Option<&WorkoutListItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> impl Iterator<Item = &WorkoutListItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
