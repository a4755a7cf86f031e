// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - workout state, persistence and view synchronization.

pub mod controller;
pub mod list;
pub mod map;
pub mod persistence;
pub mod store;
pub mod view;

pub use controller::{InteractionController, MapStatus, Mode};
pub use list::WorkoutList;
pub use map::{MapCanvas, Marker, MarkerHandle, Transition};
pub use persistence::{LoadedWorkouts, PersistenceAdapter};
pub use store::{HydrationReport, WorkoutStore};
pub use view::ViewSynchronizer;
