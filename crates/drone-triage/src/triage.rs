//! Mission triage scoring.
//!
//! Ranks missions by urgency from priority, time to ETA, the readiness of the
//! assigned drone, and the operator's environment call. Scoring is a pure
//! function of its inputs; `now` is passed in rather than read from the clock.

use crate::factors;
use crate::ranking::{Ranked, rank};
use crate::score::{Factor, FactorTable, ScoreResult};
use chrono::{DateTime, Utc};
use drone_domain::{Drone, DroneStatus, EnvironmentConditions, Mission, Priority};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Facts about a mission that triage factors read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriageInput {
    pub priority: Priority,
    /// Negative when overdue, `None` when unscheduled
    pub hours_to_eta: Option<f64>,
    /// `None` when unassigned or the assigned drone is unknown
    pub assigned: Option<(DroneStatus, Option<f32>)>,
    pub environment_safe: bool,
}

impl TriageInput {
    pub fn new(
        mission: &Mission,
        assigned: Option<&Drone>,
        environment: &EnvironmentConditions,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            priority: mission.priority,
            hours_to_eta: mission
                .eta
                .map(|eta| (eta - now).num_milliseconds() as f64 / MILLIS_PER_HOUR),
            assigned: assigned.map(|d| (d.status, d.battery_percent())),
            environment_safe: environment.safe,
        }
    }
}

static TRIAGE_TABLE: &[Factor<TriageInput>] = &[
    Factor {
        name: "priority",
        ceiling: 40.0,
        eval: |i| factors::priority(i.priority),
    },
    Factor {
        name: "urgency",
        ceiling: 30.0,
        eval: |i| factors::urgency(i.hours_to_eta),
    },
    Factor {
        name: "drone",
        ceiling: 20.0,
        eval: |i| factors::drone_readiness(i.assigned),
    },
    Factor {
        name: "weather",
        ceiling: 10.0,
        eval: |i| factors::environment(i.environment_safe),
    },
];

/// Triage weighting model. Ceilings sum to 100.
pub static TRIAGE_FACTORS: FactorTable<TriageInput> = FactorTable::new(TRIAGE_TABLE);

/// Score one mission given its assigned drone (if any).
pub fn score_triage(
    mission: &Mission,
    assigned: Option<&Drone>,
    environment: &EnvironmentConditions,
    now: DateTime<Utc>,
) -> ScoreResult {
    TRIAGE_FACTORS.score(&TriageInput::new(mission, assigned, environment, now))
}

/// Score every mission, in input order, resolving assigned drones from `drones`.
pub fn score_missions<'a>(
    missions: &'a [Mission],
    drones: &[Drone],
    environment: &EnvironmentConditions,
    now: DateTime<Utc>,
) -> Vec<(&'a Mission, ScoreResult)> {
    missions
        .iter()
        .map(|mission| {
            let assigned = mission
                .assigned_drone_id
                .and_then(|id| drones.iter().find(|d| d.id == id));
            (mission, score_triage(mission, assigned, environment, now))
        })
        .collect()
}

/// Missions ranked most urgent first.
pub fn rank_missions<'a>(
    missions: &'a [Mission],
    drones: &[Drone],
    environment: &EnvironmentConditions,
    now: DateTime<Utc>,
) -> Vec<Ranked<&'a Mission>> {
    rank(score_missions(missions, drones, environment, now))
}
