//! # Drone Dispatch Console - Domain Model
//!
//! Core entities, value objects, and enums for disaster-response drone
//! dispatch. The mission/drone management subsystem owns and mutates these
//! records; everything downstream (scoring, console, reports) reads them as
//! immutable snapshots.
//!
//! Wire shapes as served by the REST layer live in [`records`]; converting a
//! record into a domain type is where structurally malformed input is caught.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod records;

pub use records::{DroneRecord, FleetSnapshot, GeoPointRecord, MissionRecord};

// =============================================================================
// VALUE OBJECTS
// =============================================================================

/// Geographic point (WGS84), altitude optional
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_m: Option<f64>,
}

impl GeoPoint {
    /// Build a validated point.
    pub fn new(lat: f64, lon: f64, alt: Option<f64>) -> Result<Self, DomainError> {
        if !lat.is_finite() || !lon.is_finite() || lat.abs() > 90.0 || lon.abs() > 180.0 {
            return Err(DomainError::InvalidCoordinates { lat, lon });
        }
        Ok(Self {
            latitude: lat,
            longitude: lon,
            altitude_m: alt.filter(|a| a.is_finite()),
        })
    }

    /// Calculate great-circle distance to another point (Haversine formula)
    #[must_use]
    pub fn distance_to_km(&self, other: &GeoPoint) -> f64 {
        const EARTH_RADIUS_KM: f64 = 6371.0;

        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }
}

// =============================================================================
// ENUMS
// =============================================================================

/// Mission priority, ordinal 1..=4
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl Priority {
    /// Ordinal level (1 = low, 4 = critical)
    #[must_use]
    pub const fn level(self) -> u8 {
        self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl TryFrom<u8> for Priority {
    type Error = DomainError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::High),
            4 => Ok(Self::Critical),
            other => Err(DomainError::InvalidPriority(i64::from(other))),
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.level()
    }
}

/// Drone operational status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DroneStatus {
    Active,
    Idle,
    Maintenance,
    #[default]
    Offline,
}

impl DroneStatus {
    /// Active and idle drones are reachable and can take a mission.
    #[must_use]
    pub const fn is_online(self) -> bool {
        matches!(self, Self::Active | Self::Idle)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Idle => "idle",
            Self::Maintenance => "maintenance",
            Self::Offline => "offline",
        }
    }
}

impl std::str::FromStr for DroneStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "idle" => Ok(Self::Idle),
            "maintenance" => Ok(Self::Maintenance),
            "offline" => Ok(Self::Offline),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

/// Mission lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    #[default]
    Planned,
    Assigned,
    Active,
    Completed,
    Aborted,
}

// =============================================================================
// NESTED VALUE OBJECTS
// =============================================================================

/// Last-known telemetry for a drone. Every reading may be missing or stale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub battery_percent: Option<f32>,
    #[serde(default)]
    pub satellites: Option<u32>,
    #[serde(default)]
    pub relative_altitude_m: Option<f64>,
    #[serde(default)]
    pub roll_deg: Option<f64>,
    #[serde(default)]
    pub pitch_deg: Option<f64>,
    /// Link quality as a fraction, 0.0..=1.0
    #[serde(default)]
    pub link_quality: Option<f64>,
}

/// Operator-entered environment conditions.
///
/// Only `safe` feeds scoring; the other readings are informational.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConditions {
    pub safe: bool,
    #[serde(default)]
    pub wind_speed_mps: f32,
    #[serde(default)]
    pub visibility_km: f32,
    #[serde(default)]
    pub precipitation: bool,
}

impl Default for EnvironmentConditions {
    fn default() -> Self {
        Self {
            safe: true,
            wind_speed_mps: 0.0,
            visibility_km: 10.0,
            precipitation: false,
        }
    }
}

// =============================================================================
// ENTITY TYPES
// =============================================================================

/// Mission entity - a single delivery/response task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: Uuid,
    pub code: String,
    pub created_by: String,
    pub status: MissionStatus,
    pub priority: Priority,

    // Route
    pub origin: GeoPoint,
    pub destination: GeoPoint,

    /// Payload labels; only the count matters for weight estimates
    pub payloads: Vec<String>,

    /// Absent means unscheduled
    pub eta: Option<DateTime<Utc>>,
    /// Absent means unassigned
    pub assigned_drone_id: Option<Uuid>,
}

impl Mission {
    /// Estimated payload weight per item (kg)
    pub const KG_PER_PAYLOAD: f64 = 1.5;

    /// Estimated total payload weight in kilograms.
    #[must_use]
    pub fn estimated_weight_kg(&self) -> f64 {
        self.payloads.len() as f64 * Self::KG_PER_PAYLOAD
    }

    /// Great-circle route length
    #[must_use]
    pub fn route_km(&self) -> f64 {
        self.origin.distance_to_km(&self.destination)
    }
}

/// Drone entity - individual airframe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drone {
    pub id: Uuid,
    pub uid: String,
    pub callsign: String,
    pub firmware: String,
    pub status: DroneStatus,
    pub max_payload_kg: f64,
    pub last_telemetry: Option<TelemetrySnapshot>,
}

impl Drone {
    /// Battery reading, if the drone has reported one.
    #[must_use]
    pub fn battery_percent(&self) -> Option<f32> {
        self.last_telemetry.as_ref().and_then(|t| t.battery_percent)
    }

    /// Visible satellite count, if reported.
    #[must_use]
    pub fn satellites(&self) -> Option<u32> {
        self.last_telemetry.as_ref().and_then(|t| t.satellites)
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid coordinates: lat={lat}, lon={lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },

    #[error("Field {0} has the wrong type")]
    InvalidShape(&'static str),

    #[error("Invalid priority: {0} (expected 1..=4)")]
    InvalidPriority(i64),

    #[error("Unknown drone status: {0}")]
    UnknownStatus(String),

    #[error("Invalid payload capacity: {0} kg")]
    InvalidCapacity(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_levels() {
        assert_eq!(Priority::try_from(1u8).unwrap(), Priority::Low);
        assert_eq!(Priority::try_from(4u8).unwrap(), Priority::Critical);
        assert_eq!(Priority::Critical.level(), 4);
        assert!(matches!(
            Priority::try_from(0u8),
            Err(DomainError::InvalidPriority(0))
        ));
        assert!(Priority::try_from(5u8).is_err());
    }

    #[test]
    fn test_priority_wire_format() {
        let json = serde_json::to_string(&Priority::High).unwrap();
        assert_eq!(json, "3");
        let parsed: Priority = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, Priority::Medium);
        assert!(serde_json::from_str::<Priority>("9").is_err());
    }

    #[test]
    fn test_drone_status_parsing() {
        assert_eq!("IDLE".parse::<DroneStatus>().unwrap(), DroneStatus::Idle);
        assert_eq!(" active ".parse::<DroneStatus>().unwrap(), DroneStatus::Active);
        assert!("flying".parse::<DroneStatus>().is_err());
        assert!(DroneStatus::Idle.is_online());
        assert!(DroneStatus::Active.is_online());
        assert!(!DroneStatus::Maintenance.is_online());
        assert!(!DroneStatus::Offline.is_online());
    }

    #[test]
    fn test_geo_point_validation() {
        assert!(GeoPoint::new(37.77, -122.42, Some(30.0)).is_ok());
        assert!(GeoPoint::new(91.0, 0.0, None).is_err());
        assert!(GeoPoint::new(0.0, -180.5, None).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0, None).is_err());
    }

    #[test]
    fn test_distance() {
        let sf = GeoPoint::new(37.7749, -122.4194, None).unwrap();
        let oakland = GeoPoint::new(37.8044, -122.2712, None).unwrap();
        let d = sf.distance_to_km(&oakland);
        assert!((d - 13.4).abs() < 0.5, "got {d}");
        assert!(sf.distance_to_km(&sf).abs() < f64::EPSILON);
    }
}
