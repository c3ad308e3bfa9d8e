//! Synthetic fleet generation for demos and console testing.
//!
//! Produces REST-shaped records with the kinds of gaps real telemetry has:
//! stale batteries, drones that never reported, unscheduled missions, and the
//! occasional overdue ETA.

use chrono::{DateTime, Duration, Utc};
use drone_domain::{
    DroneRecord, DroneStatus, EnvironmentConditions, FleetSnapshot, GeoPointRecord,
    MissionRecord, MissionStatus, TelemetrySnapshot,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, NormalError};
use uuid::Uuid;

const PAYLOAD_KINDS: [&str; 6] = [
    "medical_kit",
    "water",
    "radio",
    "blood_units",
    "thermal_blanket",
    "defibrillator",
];

const CALLSIGNS: [&str; 6] = ["RESCUE", "MERCY", "HALO", "BEACON", "LIFELINE", "ORBIT"];

/// Fleet snapshot generator.
pub struct FleetGenerator {
    rng: StdRng,
    battery: Normal<f64>,
    /// Operations area centre (lat, lon)
    center: (f64, f64),
}

impl FleetGenerator {
    /// Reproducible generator for a given seed.
    pub fn seeded(seed: u64) -> Result<Self, NormalError> {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from system entropy.
    pub fn from_entropy() -> Result<Self, NormalError> {
        Self::with_rng(StdRng::from_entropy())
    }

    fn with_rng(rng: StdRng) -> Result<Self, NormalError> {
        Ok(Self {
            rng,
            battery: Normal::new(65.0, 20.0)?,
            // San Francisco Bay
            center: (37.7749, -122.4194),
        })
    }

    /// Generate a full snapshot.
    pub fn snapshot(&mut self, drones: usize, missions: usize, now: DateTime<Utc>) -> FleetSnapshot {
        let drones: Vec<DroneRecord> = (0..drones).map(|i| self.drone(i)).collect();
        let ids: Vec<Uuid> = drones.iter().map(|d| d.id).collect();
        let missions = (0..missions).map(|i| self.mission(i, &ids, now)).collect();

        FleetSnapshot {
            drones,
            missions,
            environment: self.environment(),
        }
    }

    fn drone(&mut self, index: usize) -> DroneRecord {
        let status = match self.rng.gen_range(0..10) {
            0..=3 => DroneStatus::Idle,
            4..=6 => DroneStatus::Active,
            7 => DroneStatus::Maintenance,
            _ => DroneStatus::Offline,
        };

        // One in eight drones has never reported telemetry
        let last_telemetry = (!self.rng.gen_bool(0.125)).then(|| self.telemetry());

        DroneRecord {
            id: Uuid::new_v4(),
            uid: format!("FC-{:05}", self.rng.gen_range(0..100_000)),
            callsign: format!("{}-{:02}", CALLSIGNS[index % CALLSIGNS.len()], index + 1),
            firmware: "ArduPilot".to_string(),
            max_payload_kg: f64::from(self.rng.gen_range(4..=20u8)) * 0.5,
            status: Some(status.as_str().into()),
            last_telemetry,
        }
    }

    fn telemetry(&mut self) -> TelemetrySnapshot {
        let battery = self.battery.sample(&mut self.rng).clamp(0.0, 100.0);
        TelemetrySnapshot {
            recorded_at: Some(Utc::now()),
            // Stale battery readings are dropped by the telemetry bridge
            battery_percent: (!self.rng.gen_bool(0.1)).then_some(battery as f32),
            satellites: (!self.rng.gen_bool(0.1)).then(|| self.rng.gen_range(3..15)),
            relative_altitude_m: Some(self.rng.gen_range(0.0..120.0)),
            roll_deg: Some(self.rng.gen_range(-5.0..5.0)),
            pitch_deg: Some(self.rng.gen_range(-5.0..5.0)),
            link_quality: Some(self.rng.gen_range(0.3..1.0)),
        }
    }

    fn point(&mut self) -> GeoPointRecord {
        GeoPointRecord {
            lat: Some(self.center.0 + self.rng.gen_range(-0.2..0.2)),
            lon: Some(self.center.1 + self.rng.gen_range(-0.2..0.2)),
            alt: Some(self.rng.gen_range(0.0..60.0)),
        }
    }

    fn mission(&mut self, index: usize, drone_ids: &[Uuid], now: DateTime<Utc>) -> MissionRecord {
        let payload_count = self.rng.gen_range(0..=5);
        let payloads = (0..payload_count)
            .map(|_| PAYLOAD_KINDS[self.rng.gen_range(0..PAYLOAD_KINDS.len())].to_string())
            .collect();

        // A third are unscheduled; the rest span 2h overdue to 20h out
        let eta = (!self.rng.gen_bool(0.33))
            .then(|| now + Duration::minutes(self.rng.gen_range(-120..1200)));

        let assigned_drone_id = if !drone_ids.is_empty() && self.rng.gen_bool(0.5) {
            Some(drone_ids[self.rng.gen_range(0..drone_ids.len())])
        } else {
            None
        };

        MissionRecord {
            id: Uuid::new_v4(),
            code: format!("SAR-{:03}", index + 1),
            created_by: "simulator".to_string(),
            status: if assigned_drone_id.is_some() {
                MissionStatus::Assigned
            } else {
                MissionStatus::Planned
            },
            priority: Some(self.rng.gen_range(1..=4u8).into()),
            origin: Some(self.point().into()),
            destination: Some(self.point().into()),
            payloads,
            eta,
            assigned_drone_id,
        }
    }

    fn environment(&mut self) -> EnvironmentConditions {
        let wind_speed_mps = self.rng.gen_range(0.0..18.0f32);
        let precipitation = self.rng.gen_bool(0.25);
        EnvironmentConditions {
            safe: wind_speed_mps < 12.0 && !precipitation,
            wind_speed_mps,
            visibility_km: self.rng.gen_range(0.5..15.0),
            precipitation,
        }
    }
}
