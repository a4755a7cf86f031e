// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map widget state: view center, zoom and the marker layer.
//!
//! The canvas owns marker lifetimes. Callers get an opaque [`MarkerHandle`]
//! back from [`MapCanvas::add_marker`] and must keep it to remove the marker.

use crate::models::{Coordinates, MarkerPopup};
use std::collections::BTreeMap;

/// Opaque handle to a marker placed on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerHandle(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub coordinates: Coordinates,
    pub popup: MarkerPopup,
    pub popup_open: bool,
}

/// How the last view change was applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub animate: bool,
    pub pan_duration_secs: f64,
}

impl Transition {
    /// Animated pan used when focusing a workout.
    pub const FOCUS: Transition = Transition {
        animate: true,
        pan_duration_secs: 1.0,
    };
}

#[derive(Debug, Clone)]
pub struct MapCanvas {
    center: Coordinates,
    zoom: u8,
    // Handles are allocated in increasing order, so iteration is creation order
    markers: BTreeMap<MarkerHandle, Marker>,
    next_handle: u64,
    last_transition: Option<Transition>,
}

impl MapCanvas {
    /// Create a map centered on `center`.
    pub fn new(center: Coordinates, zoom: u8) -> Self {
        tracing::info!(lat = center.lat, lng = center.lng, zoom, "Map created");
        Self {
            center,
            zoom,
            markers: BTreeMap::new(),
            next_handle: 0,
            last_transition: None,
        }
    }

    pub fn set_view(&mut self, center: Coordinates, zoom: u8, transition: Option<Transition>) {
        self.center = center;
        self.zoom = zoom;
        self.last_transition = transition;
    }

    /// Place a marker with its popup bound and opened.
    pub fn add_marker(&mut self, coordinates: Coordinates, popup: MarkerPopup) -> MarkerHandle {
        let handle = MarkerHandle(self.next_handle);
        self.next_handle += 1;
        self.markers.insert(
            handle,
            Marker {
                coordinates,
                popup,
                popup_open: true,
            },
        );
        handle
    }

    /// Rebind the popup of an existing marker. Returns false for an unknown handle.
    pub fn set_popup(&mut self, handle: MarkerHandle, popup: MarkerPopup) -> bool {
        match self.markers.get_mut(&handle) {
            Some(marker) => {
                marker.popup = popup;
                true
            }
            None => false,
        }
    }

    /// Remove a marker layer. Returns false for an unknown handle.
    pub fn remove_layer(&mut self, handle: MarkerHandle) -> bool {
        self.markers.remove(&handle).is_some()
    }

    pub fn marker(&self, handle: MarkerHandle) -> Option<&Marker> {
        self.markers.get(&handle)
    }

    /// Markers in creation order.
    pub fn markers(&self) -> impl Iterator<Item = (MarkerHandle, &Marker)> {
        self.markers.iter().map(|(handle, marker)| (*handle, marker))
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn center(&self) -> Coordinates {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn last_transition(&self) -> Option<Transition> {
        self.last_transition
    }
}
