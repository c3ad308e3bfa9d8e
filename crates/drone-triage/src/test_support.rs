//! Fixture builders shared by unit tests.

use chrono::{DateTime, Utc};
use drone_domain::{Drone, DroneStatus, GeoPoint, Mission, MissionStatus, Priority, TelemetrySnapshot};
use uuid::Uuid;

pub fn mission(priority: Priority, payload_count: usize, eta: Option<DateTime<Utc>>) -> Mission {
    Mission {
        id: Uuid::new_v4(),
        code: "TEST-01".to_string(),
        created_by: "ops".to_string(),
        status: MissionStatus::Planned,
        priority,
        origin: GeoPoint {
            latitude: 37.7749,
            longitude: -122.4194,
            altitude_m: None,
        },
        destination: GeoPoint {
            latitude: 37.8044,
            longitude: -122.2712,
            altitude_m: None,
        },
        payloads: (0..payload_count).map(|i| format!("kit-{i}")).collect(),
        eta,
        assigned_drone_id: None,
    }
}

pub fn drone(
    status: DroneStatus,
    battery_percent: Option<f32>,
    satellites: Option<u32>,
    max_payload_kg: f64,
) -> Drone {
    Drone {
        id: Uuid::new_v4(),
        uid: "uid-test".to_string(),
        callsign: "RESCUE-01".to_string(),
        firmware: "ArduPilot".to_string(),
        status,
        max_payload_kg,
        last_telemetry: Some(TelemetrySnapshot {
            battery_percent,
            satellites,
            ..Default::default()
        }),
    }
}
