//! Wire records as served by the mission/drone REST layer.
//!
//! Structurally required fields are optional here so that a bad record can be
//! reported and skipped instead of failing a whole snapshot. `TryFrom` is the
//! only way to obtain a domain [`Mission`] or [`Drone`] from a record.

use crate::{
    Drone, DomainError, DroneStatus, EnvironmentConditions, GeoPoint, Mission, MissionStatus,
    Priority, TelemetrySnapshot,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// `{lat, lon, alt}` as the REST layer sends it
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPointRecord {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub alt: Option<f64>,
}

impl GeoPointRecord {
    fn into_point(self, field: &'static str) -> Result<GeoPoint, DomainError> {
        let lat = self.lat.ok_or(DomainError::MissingField(field))?;
        let lon = self.lon.ok_or(DomainError::MissingField(field))?;
        GeoPoint::new(lat, lon, self.alt)
    }
}

impl From<GeoPointRecord> for Value {
    fn from(p: GeoPointRecord) -> Self {
        let mut map = Map::new();
        for (key, value) in [("lat", p.lat), ("lon", p.lon), ("alt", p.alt)] {
            if let Some(v) = value {
                map.insert(key.to_string(), Value::from(v));
            }
        }
        Self::Object(map)
    }
}

impl From<GeoPoint> for GeoPointRecord {
    fn from(p: GeoPoint) -> Self {
        Self {
            lat: Some(p.latitude),
            lon: Some(p.longitude),
            alt: p.altitude_m,
        }
    }
}

/// Mission as stored by the mission service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionRecord {
    pub id: Uuid,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub status: MissionStatus,
    /// Raw ordinal as sent; validated into [`Priority`]
    #[serde(default)]
    pub priority: Option<Value>,
    /// `{lat, lon, alt}` as sent; validated into [`GeoPoint`]
    #[serde(default)]
    pub origin: Option<Value>,
    #[serde(default)]
    pub destination: Option<Value>,
    #[serde(default)]
    pub payloads: Vec<String>,
    #[serde(default)]
    pub eta: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assigned_drone_id: Option<Uuid>,
}

impl MissionRecord {
    /// Label used when surfacing a rejected record to the operator.
    #[must_use]
    pub fn label(&self) -> String {
        if self.code.is_empty() {
            self.id.to_string()
        } else {
            self.code.clone()
        }
    }
}

fn parse_priority(value: Option<&Value>) -> Result<Priority, DomainError> {
    let raw = value
        .ok_or(DomainError::MissingField("priority"))?
        .as_i64()
        .ok_or(DomainError::InvalidShape("priority"))?;
    u8::try_from(raw)
        .ok()
        .and_then(|level| Priority::try_from(level).ok())
        .ok_or(DomainError::InvalidPriority(raw))
}

fn parse_point(value: Option<Value>, field: &'static str) -> Result<GeoPoint, DomainError> {
    let value = value.ok_or(DomainError::MissingField(field))?;
    let record: GeoPointRecord =
        serde_json::from_value(value).map_err(|_| DomainError::InvalidShape(field))?;
    record.into_point(field)
}

impl TryFrom<MissionRecord> for Mission {
    type Error = DomainError;

    fn try_from(record: MissionRecord) -> Result<Self, Self::Error> {
        let priority = parse_priority(record.priority.as_ref())?;
        let origin = parse_point(record.origin, "origin")?;
        let destination = parse_point(record.destination, "destination")?;

        Ok(Self {
            id: record.id,
            code: record.code,
            created_by: record.created_by,
            status: record.status,
            priority,
            origin,
            destination,
            payloads: record.payloads,
            eta: record.eta,
            assigned_drone_id: record.assigned_drone_id,
        })
    }
}

impl From<&Mission> for MissionRecord {
    fn from(m: &Mission) -> Self {
        Self {
            id: m.id,
            code: m.code.clone(),
            created_by: m.created_by.clone(),
            status: m.status,
            priority: Some(Value::from(m.priority.level())),
            origin: Some(GeoPointRecord::from(m.origin).into()),
            destination: Some(GeoPointRecord::from(m.destination).into()),
            payloads: m.payloads.clone(),
            eta: m.eta,
            assigned_drone_id: m.assigned_drone_id,
        }
    }
}

fn default_firmware() -> String {
    "ArduPilot".to_string()
}

fn default_max_payload() -> f64 {
    5.0
}

/// Drone as stored by the fleet registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneRecord {
    pub id: Uuid,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub callsign: String,
    #[serde(default = "default_firmware")]
    pub firmware: String,
    #[serde(default = "default_max_payload")]
    pub max_payload_kg: f64,
    /// Free-form status string as sent; validated into [`DroneStatus`]
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub last_telemetry: Option<TelemetrySnapshot>,
}

impl DroneRecord {
    /// Label used when surfacing a rejected record to the operator.
    #[must_use]
    pub fn label(&self) -> String {
        if self.callsign.is_empty() {
            self.id.to_string()
        } else {
            self.callsign.clone()
        }
    }
}

impl TryFrom<DroneRecord> for Drone {
    type Error = DomainError;

    fn try_from(record: DroneRecord) -> Result<Self, Self::Error> {
        let status = match &record.status {
            Some(Value::String(s)) => s.parse()?,
            Some(_) => return Err(DomainError::InvalidShape("status")),
            None => DroneStatus::default(),
        };
        if !record.max_payload_kg.is_finite() || record.max_payload_kg < 0.0 {
            return Err(DomainError::InvalidCapacity(record.max_payload_kg));
        }

        Ok(Self {
            id: record.id,
            uid: record.uid,
            callsign: record.callsign,
            firmware: record.firmware,
            status,
            max_payload_kg: record.max_payload_kg,
            last_telemetry: record.last_telemetry,
        })
    }
}

impl From<&Drone> for DroneRecord {
    fn from(d: &Drone) -> Self {
        Self {
            id: d.id,
            uid: d.uid.clone(),
            callsign: d.callsign.clone(),
            firmware: d.firmware.clone(),
            max_payload_kg: d.max_payload_kg,
            status: Some(Value::from(d.status.as_str())),
            last_telemetry: d.last_telemetry.clone(),
        }
    }
}

/// Point-in-time view of the fleet handed to the scoring engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetSnapshot {
    #[serde(default)]
    pub drones: Vec<DroneRecord>,
    #[serde(default)]
    pub missions: Vec<MissionRecord>,
    #[serde(default)]
    pub environment: EnvironmentConditions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mission_json() -> serde_json::Value {
        json!({
            "id": "6f1c2a7e-2b7e-4a53-9d7e-1f5f3c0b8a11",
            "code": "MED-042",
            "priority": 3,
            "origin": {"lat": 37.77, "lon": -122.42, "alt": 10.0},
            "destination": {"lat": 37.80, "lon": -122.27},
            "payloads": ["insulin", "bandages"]
        })
    }

    #[test]
    fn test_valid_mission_record() {
        let record: MissionRecord = serde_json::from_value(mission_json()).unwrap();
        let mission = Mission::try_from(record).unwrap();
        assert_eq!(mission.priority, Priority::High);
        assert_eq!(mission.status, MissionStatus::Planned);
        assert_eq!(mission.payloads.len(), 2);
        assert!((mission.estimated_weight_kg() - 3.0).abs() < f64::EPSILON);
        assert!(mission.eta.is_none());
        assert!(mission.assigned_drone_id.is_none());
    }

    #[test]
    fn test_missing_destination_is_malformed() {
        let mut value = mission_json();
        value.as_object_mut().unwrap().remove("destination");
        let record: MissionRecord = serde_json::from_value(value).unwrap();
        assert_eq!(
            Mission::try_from(record),
            Err(DomainError::MissingField("destination"))
        );
    }

    #[test]
    fn test_missing_priority_is_malformed() {
        let mut value = mission_json();
        value.as_object_mut().unwrap().remove("priority");
        let record: MissionRecord = serde_json::from_value(value).unwrap();
        assert_eq!(
            Mission::try_from(record),
            Err(DomainError::MissingField("priority"))
        );
    }

    #[test]
    fn test_out_of_range_priority_is_malformed() {
        let mut value = mission_json();
        value["priority"] = json!(7);
        let record: MissionRecord = serde_json::from_value(value).unwrap();
        assert_eq!(Mission::try_from(record), Err(DomainError::InvalidPriority(7)));

        let mut value = mission_json();
        value["priority"] = json!(-1);
        let record: MissionRecord = serde_json::from_value(value).unwrap();
        assert_eq!(Mission::try_from(record), Err(DomainError::InvalidPriority(-1)));
    }

    #[test]
    fn test_wrongly_typed_fields_are_malformed() {
        let mut value = mission_json();
        value["priority"] = json!("high");
        let record: MissionRecord = serde_json::from_value(value).unwrap();
        assert_eq!(
            Mission::try_from(record),
            Err(DomainError::InvalidShape("priority"))
        );

        let mut value = mission_json();
        value["origin"] = json!({"lat": "north", "lon": -122.42});
        let record: MissionRecord = serde_json::from_value(value).unwrap();
        assert_eq!(
            Mission::try_from(record),
            Err(DomainError::InvalidShape("origin"))
        );

        let mut value = mission_json();
        value["destination"] = json!([37.80, -122.27]);
        let record: MissionRecord = serde_json::from_value(value).unwrap();
        assert_eq!(
            Mission::try_from(record),
            Err(DomainError::InvalidShape("destination"))
        );

        let record: DroneRecord = serde_json::from_value(json!({
            "id": "0b5d8f5e-0d3f-4a3a-8a53-63cf1c9e5e01",
            "status": 3
        }))
        .unwrap();
        assert_eq!(Drone::try_from(record), Err(DomainError::InvalidShape("status")));
    }

    #[test]
    fn test_null_priority_is_missing() {
        let mut value = mission_json();
        value["priority"] = Value::Null;
        let record: MissionRecord = serde_json::from_value(value).unwrap();
        assert_eq!(
            Mission::try_from(record),
            Err(DomainError::MissingField("priority"))
        );
    }

    #[test]
    fn test_partial_coordinates_are_malformed() {
        let mut value = mission_json();
        value["origin"] = json!({"lat": 37.77});
        let record: MissionRecord = serde_json::from_value(value).unwrap();
        assert_eq!(
            Mission::try_from(record),
            Err(DomainError::MissingField("origin"))
        );
    }

    #[test]
    fn test_drone_record_defaults() {
        let record: DroneRecord = serde_json::from_value(json!({
            "id": "0b5d8f5e-0d3f-4a3a-8a53-63cf1c9e5e01",
            "callsign": "RESCUE-1"
        }))
        .unwrap();
        let drone = Drone::try_from(record).unwrap();
        assert_eq!(drone.status, DroneStatus::Offline);
        assert_eq!(drone.firmware, "ArduPilot");
        assert!((drone.max_payload_kg - 5.0).abs() < f64::EPSILON);
        assert!(drone.battery_percent().is_none());
        assert!(drone.satellites().is_none());
    }

    #[test]
    fn test_unknown_drone_status_is_malformed() {
        let record: DroneRecord = serde_json::from_value(json!({
            "id": "0b5d8f5e-0d3f-4a3a-8a53-63cf1c9e5e01",
            "status": "hovering"
        }))
        .unwrap();
        assert!(matches!(
            Drone::try_from(record),
            Err(DomainError::UnknownStatus(_))
        ));
    }

    #[test]
    fn test_mission_record_round_trip_label() {
        let record: MissionRecord = serde_json::from_value(mission_json()).unwrap();
        assert_eq!(record.label(), "MED-042");
        let mission = Mission::try_from(record.clone()).unwrap();
        assert_eq!(MissionRecord::from(&mission), record);
    }
}
