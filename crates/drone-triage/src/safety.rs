//! Landing-zone safety scoring from a drone's latest telemetry.
//!
//! Unlike compatibility and triage, factors here are raw 0–100 readings
//! combined as a weighted average. The breakdown keeps the raw readings so the
//! console can show what drove each recommendation.

use crate::error::{Result, TriageError};
use chrono::{DateTime, Utc};
use drone_domain::{Drone, TelemetrySnapshot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Landing safety assessment for one drone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyScore {
    pub drone_id: Uuid,
    /// Weighted score in [0, 100], one decimal
    pub score: f64,
    pub factors: BTreeMap<String, f64>,
    pub recommendations: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

struct SafetyFactor {
    name: &'static str,
    weight: f64,
    read: fn(&TelemetrySnapshot) -> f64,
    /// Readings below this trigger `advice`
    advise_below: f64,
    advice: &'static str,
}

static SAFETY_FACTORS: &[SafetyFactor] = &[
    SafetyFactor {
        name: "gps_quality",
        weight: 0.25,
        // 12 sats = 96
        read: |t| (f64::from(t.satellites.unwrap_or(0)) * 8.0).min(100.0),
        advise_below: 70.0,
        advice: "Wait for better GPS fix before landing",
    },
    SafetyFactor {
        name: "battery_level",
        weight: 0.25,
        read: |t| f64::from(t.battery_percent.unwrap_or(0.0)).clamp(0.0, 100.0),
        advise_below: 30.0,
        advice: "Low battery - prioritize immediate landing",
    },
    SafetyFactor {
        name: "altitude_safety",
        weight: 0.20,
        read: |t| match t.relative_altitude_m {
            Some(alt) if alt > 10.0 => 100.0,
            _ => 50.0,
        },
        advise_below: 100.0,
        advice: "Increase altitude before approach",
    },
    SafetyFactor {
        name: "attitude_stability",
        weight: 0.15,
        read: |t| match (t.roll_deg, t.pitch_deg) {
            (Some(roll), Some(pitch)) => (100.0 - roll.abs() * 10.0 - pitch.abs() * 10.0).max(0.0),
            _ => 0.0,
        },
        advise_below: 80.0,
        advice: "Stabilize attitude before descent",
    },
    SafetyFactor {
        name: "link_quality",
        weight: 0.15,
        read: |t| (t.link_quality.unwrap_or(0.0) * 100.0).clamp(0.0, 100.0),
        advise_below: 70.0,
        advice: "Improve communication link quality",
    },
];

/// Score a drone's landing safety from its last telemetry snapshot.
pub fn score_landing_safety(drone: &Drone, now: DateTime<Utc>) -> Result<SafetyScore> {
    let telemetry = drone
        .last_telemetry
        .as_ref()
        .ok_or(TriageError::NoTelemetry(drone.id))?;

    let mut factors = BTreeMap::new();
    let mut recommendations = Vec::new();
    let mut weighted = 0.0;

    for factor in SAFETY_FACTORS {
        let mut value = (factor.read)(telemetry);
        if value.is_nan() {
            value = 0.0;
        }
        weighted += value * factor.weight;
        if value < factor.advise_below {
            recommendations.push(factor.advice.to_string());
        }
        factors.insert(factor.name.to_string(), value);
    }

    Ok(SafetyScore {
        drone_id: drone.id,
        score: (weighted * 10.0).round() / 10.0,
        factors,
        recommendations,
        timestamp: now,
    })
}
