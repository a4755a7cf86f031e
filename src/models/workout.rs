// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout record model, shared by the store, the views and the persisted payload.
//!
//! A record is built once by a factory that validates the inputs and computes
//! the derived metric and label. Those derived values are stored as plain data,
//! so a record read back from storage is identical to the one that was saved.

use crate::error::{AppError, Result};
use crate::time_utils::format_month_day;
use chrono::{DateTime, Utc};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of random bytes in a workout id (hex-encoded to twice as many chars).
const ID_BYTES: usize = 6;

/// Opaque workout identifier, the join key between store, views and storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    /// Generate a fresh random id.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; ID_BYTES];
        SystemRandom::new()
            .fill(&mut bytes)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG unavailable")))?;
        Ok(Self(hex::encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for WorkoutId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for WorkoutId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Workout variant tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(ts_rs::TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Lowercase tag, also used as the CSS class stem ("running-popup").
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized name used in labels.
    pub fn display_name(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    /// Persisted key of the kind's own third field.
    pub fn variant_key(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "cadenceSpm",
            WorkoutKind::Cycling => "elevationGainM",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }
}

/// A (latitude, longitude) pair, persisted as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check the pair is finite and within WGS84 bounds.
    pub fn validate(&self) -> Result<()> {
        let valid = self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng);
        if valid {
            Ok(())
        } else {
            Err(AppError::InvalidInput(format!(
                "Coordinates out of range: [{}, {}]",
                self.lat, self.lng
            )))
        }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

impl From<Coordinates> for geo::Point<f64> {
    fn from(c: Coordinates) -> Self {
        geo::Point::new(c.lng, c.lat)
    }
}

/// Variant-specific data: the user-entered third field plus the derived metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WorkoutDetails {
    Running {
        #[serde(rename = "cadenceSpm")]
        cadence_spm: f64,
        /// Pace in min/km.
        #[serde(rename = "derivedMetric")]
        pace_min_per_km: f64,
    },
    Cycling {
        #[serde(rename = "elevationGainM")]
        elevation_gain_m: f64,
        /// Speed in km/h.
        #[serde(rename = "derivedMetric")]
        speed_km_per_h: f64,
    },
}

impl WorkoutDetails {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    pub fn derived_metric(&self) -> f64 {
        match *self {
            WorkoutDetails::Running {
                pace_min_per_km, ..
            } => pace_min_per_km,
            WorkoutDetails::Cycling { speed_km_per_h, .. } => speed_km_per_h,
        }
    }

    /// The variant's user-entered value (cadence or elevation gain).
    pub fn variant_value(&self) -> f64 {
        match *self {
            WorkoutDetails::Running { cadence_spm, .. } => cadence_spm,
            WorkoutDetails::Cycling {
                elevation_gain_m, ..
            } => elevation_gain_m,
        }
    }
}

/// Validated-on-use numeric input for building a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutInput {
    Running {
        distance_km: f64,
        duration_min: f64,
        cadence_spm: f64,
    },
    Cycling {
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    },
}

impl WorkoutInput {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutInput::Running { .. } => WorkoutKind::Running,
            WorkoutInput::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// Every numeric field must be finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        match *self {
            WorkoutInput::Running {
                distance_km,
                duration_min,
                cadence_spm,
            } => {
                require_positive("distanceKm", distance_km)?;
                require_positive("durationMin", duration_min)?;
                require_positive("cadenceSpm", cadence_spm)?;
            }
            WorkoutInput::Cycling {
                distance_km,
                duration_min,
                elevation_gain_m,
            } => {
                require_positive("distanceKm", distance_km)?;
                require_positive("durationMin", duration_min)?;
                require_positive("elevationGainM", elevation_gain_m)?;
            }
        }
        Ok(())
    }
}

fn require_positive(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!(
            "{} must be a finite positive number, got {}",
            field, value
        )))
    }
}

/// One logged workout.
///
/// Fields are private: records come only from the factories, from `revise`,
/// or from deserialization followed by [`WorkoutRecord::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    id: WorkoutId,
    distance_km: f64,
    duration_min: f64,
    coordinates: Coordinates,
    created_at: DateTime<Utc>,
    #[serde(flatten)]
    details: WorkoutDetails,
    label: String,
    #[serde(default)]
    interaction_count: u32,
}

impl WorkoutRecord {
    /// Create a running workout placed at `coordinates`.
    pub fn create_running(
        distance_km: f64,
        duration_min: f64,
        coordinates: Coordinates,
        cadence_spm: f64,
    ) -> Result<Self> {
        Self::create(
            WorkoutInput::Running {
                distance_km,
                duration_min,
                cadence_spm,
            },
            coordinates,
        )
    }

    /// Create a cycling workout placed at `coordinates`.
    pub fn create_cycling(
        distance_km: f64,
        duration_min: f64,
        coordinates: Coordinates,
        elevation_gain_m: f64,
    ) -> Result<Self> {
        Self::create(
            WorkoutInput::Cycling {
                distance_km,
                duration_min,
                elevation_gain_m,
            },
            coordinates,
        )
    }

    /// Validate `input`, then build a record with a fresh id and the current time.
    pub fn create(input: WorkoutInput, coordinates: Coordinates) -> Result<Self> {
        input.validate()?;
        coordinates.validate()?;
        let id = WorkoutId::generate()?;
        Ok(Self::assemble(id, &input, coordinates, Utc::now(), 0))
    }

    /// Build the edited version of this record.
    ///
    /// Identity, creation time, placement and interaction count carry over;
    /// everything derived from `input` is recomputed.
    pub fn revise(&self, input: &WorkoutInput) -> Result<Self> {
        input.validate()?;
        Ok(Self::assemble(
            self.id.clone(),
            input,
            self.coordinates,
            self.created_at,
            self.interaction_count,
        ))
    }

    fn assemble(
        id: WorkoutId,
        input: &WorkoutInput,
        coordinates: Coordinates,
        created_at: DateTime<Utc>,
        interaction_count: u32,
    ) -> Self {
        let (distance_km, duration_min, details) = match *input {
            WorkoutInput::Running {
                distance_km,
                duration_min,
                cadence_spm,
            } => (
                distance_km,
                duration_min,
                WorkoutDetails::Running {
                    cadence_spm,
                    pace_min_per_km: duration_min / distance_km,
                },
            ),
            WorkoutInput::Cycling {
                distance_km,
                duration_min,
                elevation_gain_m,
            } => (
                distance_km,
                duration_min,
                WorkoutDetails::Cycling {
                    elevation_gain_m,
                    speed_km_per_h: distance_km / (duration_min / 60.0),
                },
            ),
        };

        let label = format!(
            "{} on {}",
            details.kind().display_name(),
            format_month_day(created_at)
        );

        Self {
            id,
            distance_km,
            duration_min,
            coordinates,
            created_at,
            details,
            label,
            interaction_count,
        }
    }

    /// Check a record that did not come from a factory (e.g. read from storage).
    ///
    /// The stored derived metric is kept as-is; it only has to be usable.
    pub fn validate(&self) -> Result<()> {
        if self.id.as_str().is_empty() {
            return Err(AppError::InvalidInput("id must not be empty".to_string()));
        }
        if self.label.trim().is_empty() {
            return Err(AppError::InvalidInput("label must not be empty".to_string()));
        }
        self.to_input().validate()?;
        require_positive("derivedMetric", self.details.derived_metric())?;
        self.coordinates.validate()
    }

    /// The numeric input this record was built from, used to pre-fill the edit form.
    pub fn to_input(&self) -> WorkoutInput {
        match self.details {
            WorkoutDetails::Running { cadence_spm, .. } => WorkoutInput::Running {
                distance_km: self.distance_km,
                duration_min: self.duration_min,
                cadence_spm,
            },
            WorkoutDetails::Cycling {
                elevation_gain_m, ..
            } => WorkoutInput::Cycling {
                distance_km: self.distance_km,
                duration_min: self.duration_min,
                elevation_gain_m,
            },
        }
    }

    pub(crate) fn record_interaction(&mut self) {
        self.interaction_count = self.interaction_count.saturating_add(1);
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn kind(&self) -> WorkoutKind {
        self.details.kind()
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn details(&self) -> &WorkoutDetails {
        &self.details
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn interaction_count(&self) -> u32 {
        self.interaction_count
    }

    pub fn pace_min_per_km(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Running {
                pace_min_per_km, ..
            } => Some(pace_min_per_km),
            WorkoutDetails::Cycling { .. } => None,
        }
    }

    pub fn speed_km_per_h(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Cycling { speed_km_per_h, .. } => Some(speed_km_per_h),
            WorkoutDetails::Running { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    const EPSILON: f64 = 1e-9;

    fn here() -> Coordinates {
        Coordinates::new(10.0, 20.0)
    }

    #[test]
    fn test_running_pace_formula() {
        let run = WorkoutRecord::create_running(5.0, 25.0, here(), 180.0).unwrap();
        assert_eq!(run.kind(), WorkoutKind::Running);
        assert!((run.pace_min_per_km().unwrap() - 5.0).abs() < EPSILON);
        assert_eq!(run.speed_km_per_h(), None);

        let run = WorkoutRecord::create_running(3.7, 21.3, here(), 165.0).unwrap();
        assert!((run.pace_min_per_km().unwrap() - 21.3 / 3.7).abs() < EPSILON);
    }

    #[test]
    fn test_cycling_speed_formula() {
        let ride = WorkoutRecord::create_cycling(30.0, 90.0, here(), 420.0).unwrap();
        assert_eq!(ride.kind(), WorkoutKind::Cycling);
        assert!((ride.speed_km_per_h().unwrap() - 20.0).abs() < EPSILON);
        assert_eq!(ride.pace_min_per_km(), None);
        assert_eq!(ride.details().variant_value(), 420.0);
    }

    #[test]
    fn test_rejects_non_positive_and_non_finite() {
        let bad_values = [0.0, -5.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY];
        for bad in bad_values {
            assert!(matches!(
                WorkoutRecord::create_running(bad, 25.0, here(), 180.0),
                Err(AppError::InvalidInput(_))
            ));
            assert!(matches!(
                WorkoutRecord::create_running(5.0, bad, here(), 180.0),
                Err(AppError::InvalidInput(_))
            ));
            assert!(matches!(
                WorkoutRecord::create_running(5.0, 25.0, here(), bad),
                Err(AppError::InvalidInput(_))
            ));
            assert!(matches!(
                WorkoutRecord::create_cycling(10.0, 30.0, here(), bad),
                Err(AppError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_rejects_out_of_range_coordinates() {
        let result = WorkoutRecord::create_running(5.0, 25.0, Coordinates::new(91.0, 0.0), 180.0);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_label_uses_kind_and_creation_date() {
        let created_at = Utc.with_ymd_and_hms(2024, 4, 3, 8, 0, 0).unwrap();
        let input = WorkoutInput::Running {
            distance_km: 5.0,
            duration_min: 25.0,
            cadence_spm: 180.0,
        };
        let run = WorkoutRecord::assemble(WorkoutId::from("abc"), &input, here(), created_at, 0);
        assert_eq!(run.label(), "Running on April 3");

        let input = WorkoutInput::Cycling {
            distance_km: 20.0,
            duration_min: 60.0,
            elevation_gain_m: 300.0,
        };
        let ride = WorkoutRecord::assemble(WorkoutId::from("def"), &input, here(), created_at, 0);
        assert_eq!(ride.label(), "Cycling on April 3");
    }

    #[test]
    fn test_ids_are_fresh() {
        let a = WorkoutRecord::create_running(5.0, 25.0, here(), 180.0).unwrap();
        let b = WorkoutRecord::create_running(5.0, 25.0, here(), 180.0).unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.id().as_str().len(), ID_BYTES * 2);
    }

    #[test]
    fn test_revise_keeps_identity() {
        let mut run = WorkoutRecord::create_running(5.0, 25.0, here(), 180.0).unwrap();
        run.record_interaction();

        let revised = run
            .revise(&WorkoutInput::Cycling {
                distance_km: 20.0,
                duration_min: 60.0,
                elevation_gain_m: 150.0,
            })
            .unwrap();

        assert_eq!(revised.id(), run.id());
        assert_eq!(revised.created_at(), run.created_at());
        assert_eq!(revised.coordinates(), run.coordinates());
        assert_eq!(revised.interaction_count(), 1);
        assert_eq!(revised.kind(), WorkoutKind::Cycling);
        assert!((revised.speed_km_per_h().unwrap() - 20.0).abs() < EPSILON);
        assert!(revised.label().starts_with("Cycling on "));
    }

    #[test]
    fn test_persisted_shape() {
        let run = WorkoutRecord::create_running(5.0, 25.0, here(), 180.0).unwrap();
        let value = serde_json::to_value(&run).unwrap();

        assert_eq!(value["id"], json!(run.id().as_str()));
        assert_eq!(value["kind"], json!("running"));
        assert_eq!(value["distanceKm"], json!(5.0));
        assert_eq!(value["durationMin"], json!(25.0));
        assert_eq!(value["coordinates"], json!([10.0, 20.0]));
        assert_eq!(value["cadenceSpm"], json!(180.0));
        assert_eq!(value["derivedMetric"], json!(5.0));
        assert_eq!(value["label"], json!(run.label()));
        assert_eq!(value["interactionCount"], json!(0));
        assert!(value["createdAt"].is_string());
        assert!(value.get("elevationGainM").is_none());
    }

    #[test]
    fn test_deserialize_tolerates_extra_fields() {
        let value = json!({
            "id": "a1b2c3",
            "kind": "cycling",
            "distanceKm": 12,
            "durationMin": 36,
            "coordinates": [45.5, -122.6],
            "createdAt": "2024-04-03T08:00:00Z",
            "elevationGainM": 210,
            "derivedMetric": 20.0,
            "label": "Cycling on April 3",
            "interactionCount": 2,
            "schema": "unused"
        });

        let ride: WorkoutRecord = serde_json::from_value(value).unwrap();
        ride.validate().unwrap();
        assert_eq!(ride.kind(), WorkoutKind::Cycling);
        assert_eq!(ride.distance_km(), 12.0);
        assert_eq!(ride.interaction_count(), 2);
    }

    #[test]
    fn test_deserialize_rejects_mismatched_variant_field() {
        let value = json!({
            "id": "a1b2c3",
            "kind": "running",
            "distanceKm": 5.0,
            "durationMin": 25.0,
            "coordinates": [10.0, 20.0],
            "createdAt": "2024-04-03T08:00:00Z",
            "elevationGainM": 100.0,
            "derivedMetric": 5.0,
            "label": "Running on April 3"
        });

        assert!(serde_json::from_value::<WorkoutRecord>(value).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_stored_metric() {
        let value = json!({
            "id": "a1b2c3",
            "kind": "running",
            "distanceKm": 5.0,
            "durationMin": 25.0,
            "coordinates": [10.0, 20.0],
            "createdAt": "2024-04-03T08:00:00Z",
            "cadenceSpm": 170.0,
            "derivedMetric": -1.0,
            "label": "Running on April 3"
        });

        let run: WorkoutRecord = serde_json::from_value(value).unwrap();
        assert!(matches!(run.validate(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_geo_point_conversion() {
        let point: geo::Point<f64> = Coordinates::new(10.0, 20.0).into();
        assert_eq!(point.x(), 20.0);
        assert_eq!(point.y(), 10.0);
    }
}
