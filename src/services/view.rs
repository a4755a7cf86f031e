// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Keeps the map markers and the list entries in step with the store.
//!
//! The map half and the list half fail independently: a missing map skips
//! marker work, a missing list anchor skips list work, and the marker
//! bookkeeping stays consistent either way.

use crate::models::{
    Coordinates, MapView, MarkerPopup, MarkerView, WorkoutId, WorkoutListItem, WorkoutRecord,
};
use crate::services::list::WorkoutList;
use crate::services::map::{MapCanvas, Marker, MarkerHandle, Transition};
use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject};
use serde_json::json;
use std::collections::HashMap;

pub struct ViewSynchronizer {
    map: Option<MapCanvas>,
    list: WorkoutList,
    /// Marker handle per workout; only populated while a map exists.
    markers: HashMap<WorkoutId, MarkerHandle>,
    zoom: u8,
}

impl ViewSynchronizer {
    /// A synchronizer with no map yet.
    pub fn new(list: WorkoutList, zoom: u8) -> Self {
        Self {
            map: None,
            list,
            markers: HashMap::new(),
            zoom,
        }
    }

    /// Create the map at `center` and place markers for `records`, in order.
    pub fn init_map(&mut self, center: Coordinates, records: &[WorkoutRecord]) {
        self.map = Some(MapCanvas::new(center, self.zoom));
        self.markers.clear();
        for record in records {
            self.place_marker(record);
        }
    }

    pub fn map(&self) -> Option<&MapCanvas> {
        self.map.as_ref()
    }

    pub fn list(&self) -> &WorkoutList {
        &self.list
    }

    pub fn marker_handle(&self, id: &WorkoutId) -> Option<MarkerHandle> {
        self.markers.get(id).copied()
    }

    /// Show a new workout: a marker with an open popup, and a list entry.
    pub fn render_added(&mut self, record: &WorkoutRecord) {
        self.place_marker(record);
        if !self.list.insert_after_form(WorkoutListItem::from(record)) {
            tracing::debug!(workout_id = %record.id(), "No list anchor, entry not rendered");
        }
    }

    /// Refresh an existing workout's popup and list entry in place.
    pub fn render_updated(&mut self, record: &WorkoutRecord) {
        if let (Some(map), Some(handle)) = (self.map.as_mut(), self.markers.get(record.id())) {
            if !map.set_popup(*handle, MarkerPopup::from(record)) {
                tracing::warn!(workout_id = %record.id(), "Tracked marker missing from map");
            }
        }
        if self.list.has_anchor() && !self.list.replace(WorkoutListItem::from(record)) {
            tracing::warn!(workout_id = %record.id(), "List entry missing for updated workout");
        }
    }

    /// Take down the marker and list entry of workout `id`.
    pub fn render_removed(&mut self, id: &WorkoutId) {
        // Take the handle out of the mapping first; the map only knows handles
        if let Some(handle) = self.markers.remove(id) {
            let removed = self
                .map
                .as_mut()
                .is_some_and(|map| map.remove_layer(handle));
            if !removed {
                tracing::warn!(workout_id = %id, "Tracked marker missing from map");
            }
        }
        if self.list.has_anchor() && !self.list.remove(id.as_str()) {
            tracing::debug!(workout_id = %id, "No list entry to remove");
        }
    }

    /// Render every record in store order (hydration).
    ///
    /// Each entry is inserted below the form, so the list ends up newest first.
    pub fn render_all(&mut self, records: &[WorkoutRecord]) {
        for record in records {
            self.render_added(record);
        }
        tracing::debug!(count = records.len(), "Rendered all workouts");
    }

    /// Recenter the map on `record` with an animated pan.
    pub fn focus_on(&mut self, record: &WorkoutRecord) -> bool {
        match self.map.as_mut() {
            Some(map) => {
                map.set_view(record.coordinates(), self.zoom, Some(Transition::FOCUS));
                true
            }
            None => false,
        }
    }

    /// Remove every marker and list entry.
    pub fn clear(&mut self) {
        if let Some(map) = self.map.as_mut() {
            for (_, handle) in self.markers.drain() {
                map.remove_layer(handle);
            }
        }
        self.markers.clear();
        self.list.clear();
    }

    pub fn list_items(&self) -> Vec<WorkoutListItem> {
        self.list.items().cloned().collect()
    }

    /// Current map state with each marker joined to its workout.
    pub fn map_view(&self) -> Option<MapView> {
        let map = self.map.as_ref()?;
        Some(MapView {
            center: map.center().into(),
            zoom: map.zoom(),
            markers: self
                .tracked_markers(map)
                .map(|(id, marker)| MarkerView {
                    workout_id: id.to_string(),
                    coordinates: marker.coordinates.into(),
                    popup: marker.popup.clone(),
                    popup_open: marker.popup_open,
                })
                .collect(),
        })
    }

    /// The marker layer as GeoJSON points (longitude, latitude).
    pub fn markers_geojson(&self) -> FeatureCollection {
        let features = match self.map.as_ref() {
            Some(map) => self
                .tracked_markers(map)
                .map(|(id, marker)| {
                    let point: geo::Point<f64> = marker.coordinates.into();
                    let mut properties = JsonObject::new();
                    properties.insert("workoutId".to_string(), json!(id.as_str()));
                    properties.insert("className".to_string(), json!(marker.popup.class_name));
                    properties.insert("popup".to_string(), json!(marker.popup.content));
                    Feature {
                        bbox: None,
                        geometry: Some(Geometry::new(geojson::Value::from(&point))),
                        id: Some(Id::String(id.to_string())),
                        properties: Some(properties),
                        foreign_members: None,
                    }
                })
                .collect(),
            None => Vec::new(),
        };

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }

    /// Markers in creation order, paired with their workout ids.
    fn tracked_markers<'a>(
        &'a self,
        map: &'a MapCanvas,
    ) -> impl Iterator<Item = (&'a WorkoutId, &'a Marker)> + 'a {
        let owners: HashMap<MarkerHandle, &WorkoutId> = self
            .markers
            .iter()
            .map(|(id, handle)| (*handle, id))
            .collect();
        map.markers()
            .filter_map(move |(handle, marker)| owners.get(&handle).map(|id| (*id, marker)))
    }

    fn place_marker(&mut self, record: &WorkoutRecord) {
        let Some(map) = self.map.as_mut() else {
            return;
        };
        if let Some(stale) = self.markers.remove(record.id()) {
            map.remove_layer(stale);
        }
        let handle = map.add_marker(record.coordinates(), MarkerPopup::from(record));
        self.markers.insert(record.id().clone(), handle);
    }
}
