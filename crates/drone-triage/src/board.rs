//! Record-level boards: validate a fleet snapshot, set malformed records
//! aside, score and rank the rest.

use crate::compatibility::recommend_drone;
use crate::error::{Result, TriageError};
use crate::ranking::Ranked;
use crate::safety::{SafetyScore, score_landing_safety};
use crate::triage::rank_missions;
use chrono::{DateTime, Utc};
use drone_domain::{
    Drone, DroneRecord, DroneStatus, EnvironmentConditions, FleetSnapshot, Mission,
    MissionRecord, MissionStatus, Priority,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Record excluded from scoring, with the reason shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRecord {
    pub label: String,
    pub reason: String,
}

impl RejectedRecord {
    fn new(label: String, error: &TriageError) -> Self {
        Self {
            label,
            reason: error.to_string(),
        }
    }
}

/// Mission as shown on the triage board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionSummary {
    pub id: Uuid,
    pub code: String,
    pub priority: Priority,
    pub status: MissionStatus,
    pub eta: Option<DateTime<Utc>>,
    pub assigned_drone_id: Option<Uuid>,
    pub route_km: f64,
    /// Set when a score component fell back to a default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<&Mission> for MissionSummary {
    fn from(m: &Mission) -> Self {
        Self {
            id: m.id,
            code: m.code.clone(),
            priority: m.priority,
            status: m.status,
            eta: m.eta,
            assigned_drone_id: m.assigned_drone_id,
            route_km: m.route_km(),
            note: None,
        }
    }
}

/// Drone as shown on the compatibility board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneSummary {
    pub id: Uuid,
    pub callsign: String,
    pub status: DroneStatus,
    pub battery_percent: Option<f32>,
    pub satellites: Option<u32>,
    pub max_payload_kg: f64,
}

impl From<&Drone> for DroneSummary {
    fn from(d: &Drone) -> Self {
        Self {
            id: d.id,
            callsign: d.callsign.clone(),
            status: d.status,
            battery_percent: d.battery_percent(),
            satellites: d.satellites(),
            max_payload_kg: d.max_payload_kg,
        }
    }
}

/// Missions ranked by triage score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageBoard {
    pub generated_at: DateTime<Utc>,
    pub environment: EnvironmentConditions,
    pub entries: Vec<Ranked<MissionSummary>>,
    pub rejected: Vec<RejectedRecord>,
}

/// Candidate drones ranked for one mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityBoard {
    pub generated_at: DateTime<Utc>,
    pub mission: MissionSummary,
    pub entries: Vec<Ranked<DroneSummary>>,
    pub rejected: Vec<RejectedRecord>,
}

fn validate_drones(records: &[DroneRecord], rejected: &mut Vec<RejectedRecord>) -> Vec<Drone> {
    records
        .iter()
        .filter_map(|record| match Drone::try_from(record.clone()) {
            Ok(drone) => Some(drone),
            Err(e) => {
                rejected.push(RejectedRecord::new(record.label(), &e.into()));
                None
            }
        })
        .collect()
}

fn validate_missions(
    records: &[MissionRecord],
    rejected: &mut Vec<RejectedRecord>,
) -> Vec<Mission> {
    records
        .iter()
        .filter_map(|record| match Mission::try_from(record.clone()) {
            Ok(mission) => Some(mission),
            Err(e) => {
                rejected.push(RejectedRecord::new(record.label(), &e.into()));
                None
            }
        })
        .collect()
}

/// Explain why an assigned mission's readiness is the unassigned default.
fn readiness_note(mission: &Mission, drones: &[Drone], records: &[DroneRecord]) -> Option<String> {
    let id = mission.assigned_drone_id?;
    if drones.iter().any(|d| d.id == id) {
        return None;
    }
    let reason = match records.iter().find(|r| r.id == id) {
        Some(record) => format!("assigned drone {} was rejected", record.label()),
        None => format!("assigned drone {id} is not in the snapshot"),
    };
    Some(format!("{reason}; readiness scored as unassigned"))
}

/// Rank every well-formed mission in the snapshot.
pub fn triage_board(snapshot: &FleetSnapshot, now: DateTime<Utc>) -> TriageBoard {
    let mut rejected = Vec::new();
    let drones = validate_drones(&snapshot.drones, &mut rejected);
    let missions = validate_missions(&snapshot.missions, &mut rejected);

    let entries = rank_missions(&missions, &drones, &snapshot.environment, now)
        .into_iter()
        .map(|r| {
            let mut entity = MissionSummary::from(r.entity);
            entity.note = readiness_note(r.entity, &drones, &snapshot.drones);
            Ranked {
                rank: r.rank,
                entity,
                score: r.score,
            }
        })
        .collect();

    TriageBoard {
        generated_at: now,
        environment: snapshot.environment,
        entries,
        rejected,
    }
}

/// Rank online drones for one mission.
///
/// This is the upstream step that narrows candidates to active and idle
/// drones before handing them to the scorer. A malformed target mission is an
/// error; malformed drone records are listed as rejected.
pub fn compatibility_board(
    snapshot: &FleetSnapshot,
    mission_id: Uuid,
    now: DateTime<Utc>,
) -> Result<CompatibilityBoard> {
    let record = snapshot
        .missions
        .iter()
        .find(|m| m.id == mission_id)
        .ok_or(TriageError::MissionNotFound(mission_id))?;
    let mission = Mission::try_from(record.clone())?;

    let mut rejected = Vec::new();
    let candidates: Vec<Drone> = validate_drones(&snapshot.drones, &mut rejected)
        .into_iter()
        .filter(|d| d.status.is_online())
        .collect();

    let entries = recommend_drone(&mission, &candidates)
        .into_iter()
        .map(|r| Ranked {
            rank: r.rank,
            entity: DroneSummary::from(r.entity),
            score: r.score,
        })
        .collect();

    Ok(CompatibilityBoard {
        generated_at: now,
        mission: MissionSummary::from(&mission),
        entries,
        rejected,
    })
}

/// Landing safety for one drone in the snapshot.
pub fn landing_safety(
    snapshot: &FleetSnapshot,
    drone_id: Uuid,
    now: DateTime<Utc>,
) -> Result<SafetyScore> {
    let record = snapshot
        .drones
        .iter()
        .find(|d| d.id == drone_id)
        .ok_or(TriageError::DroneNotFound(drone_id))?;
    let drone = Drone::try_from(record.clone())?;
    score_landing_safety(&drone, now)
}
