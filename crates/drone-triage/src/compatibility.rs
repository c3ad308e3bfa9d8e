//! Drone-to-mission compatibility scoring.

use crate::factors;
use crate::ranking::{Ranked, rank};
use crate::score::{Factor, FactorTable, ScoreResult};
use drone_domain::{Drone, DroneStatus, Mission};

/// Facts about a (drone, mission) pair that compatibility factors read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompatibilityInput {
    pub battery_percent: Option<f32>,
    pub satellites: Option<u32>,
    pub status: DroneStatus,
    pub max_payload_kg: f64,
    pub estimated_weight_kg: f64,
}

impl CompatibilityInput {
    pub fn new(mission: &Mission, drone: &Drone) -> Self {
        Self {
            battery_percent: drone.battery_percent(),
            satellites: drone.satellites(),
            status: drone.status,
            max_payload_kg: drone.max_payload_kg,
            estimated_weight_kg: mission.estimated_weight_kg(),
        }
    }
}

static COMPATIBILITY_TABLE: &[Factor<CompatibilityInput>] = &[
    Factor {
        name: "battery",
        ceiling: 30.0,
        eval: |i| factors::battery(i.battery_percent),
    },
    Factor {
        name: "payload",
        ceiling: 25.0,
        eval: |i| factors::payload_margin(i.max_payload_kg, i.estimated_weight_kg),
    },
    Factor {
        name: "status",
        ceiling: 25.0,
        eval: |i| factors::drone_status(i.status),
    },
    Factor {
        name: "gps",
        ceiling: 20.0,
        eval: |i| factors::gps_quality(i.satellites),
    },
];

/// Compatibility weighting model. Ceilings sum to 100.
pub static COMPATIBILITY_FACTORS: FactorTable<CompatibilityInput> =
    FactorTable::new(COMPATIBILITY_TABLE);

/// Score one drone against one mission.
pub fn score_compatibility(mission: &Mission, drone: &Drone) -> ScoreResult {
    COMPATIBILITY_FACTORS.score(&CompatibilityInput::new(mission, drone))
}

/// Score every candidate, in input order.
///
/// No filtering happens here: candidates are expected to be pre-filtered to
/// online drones, and drones with missing telemetry are scored, not dropped.
pub fn score_candidates<'a>(mission: &Mission, candidates: &'a [Drone]) -> Vec<(&'a Drone, ScoreResult)> {
    candidates
        .iter()
        .map(|drone| (drone, score_compatibility(mission, drone)))
        .collect()
}

/// Candidates ranked best-first for assignment.
pub fn recommend_drone<'a>(mission: &Mission, candidates: &'a [Drone]) -> Vec<Ranked<&'a Drone>> {
    rank(score_candidates(mission, candidates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{drone, mission};
    use drone_domain::Priority;

    #[test]
    fn test_ceilings_sum_to_100() {
        assert!((COMPATIBILITY_FACTORS.total_ceiling() - 100.0).abs() < f64::EPSILON);
        let names: Vec<_> = COMPATIBILITY_FACTORS.factors().iter().map(|f| f.name).collect();
        assert_eq!(names, ["battery", "payload", "status", "gps"]);
    }

    #[test]
    fn test_ideal_drone_scores_100() {
        let m = mission(Priority::High, 2, None);
        let d = drone(DroneStatus::Idle, Some(80.0), Some(9), 5.0);
        let result = score_compatibility(&m, &d);

        assert_eq!(result.factor("battery"), Some(30.0));
        assert_eq!(result.factor("payload"), Some(25.0));
        assert_eq!(result.factor("status"), Some(25.0));
        assert_eq!(result.factor("gps"), Some(20.0));
        assert_eq!(result.total, 100.0);
    }

    #[test]
    fn test_missing_telemetry_degrades_to_zero() {
        let m = mission(Priority::Low, 1, None);
        let mut d = drone(DroneStatus::Active, None, None, 5.0);
        d.last_telemetry = None;
        let result = score_compatibility(&m, &d);

        assert_eq!(result.factor("battery"), Some(0.0));
        assert_eq!(result.factor("gps"), Some(0.0));
        assert_eq!(result.factor("status"), Some(15.0));
        assert_eq!(result.factor("payload"), Some(25.0));
        assert_eq!(result.total, 40.0);
    }

    #[test]
    fn test_candidates_keep_input_order_and_count() {
        let m = mission(Priority::Medium, 3, None);
        let fleet = vec![
            drone(DroneStatus::Active, Some(20.0), Some(3), 2.0),
            drone(DroneStatus::Idle, None, None, 10.0),
            drone(DroneStatus::Idle, Some(95.0), Some(12), 10.0),
        ];
        let scored = score_candidates(&m, &fleet);
        assert_eq!(scored.len(), 3);
        for ((d, _), original) in scored.iter().zip(&fleet) {
            assert_eq!(d.id, original.id);
        }
    }

    #[test]
    fn test_recommendation_order() {
        let m = mission(Priority::Medium, 3, None);
        let fleet = vec![
            drone(DroneStatus::Active, Some(20.0), Some(3), 2.0),
            drone(DroneStatus::Idle, None, None, 10.0),
            drone(DroneStatus::Idle, Some(95.0), Some(12), 10.0),
        ];
        let ranked = recommend_drone(&m, &fleet);
        assert_eq!(ranked[0].entity.id, fleet[2].id);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].entity.id, fleet[1].id);
        assert_eq!(ranked[2].entity.id, fleet[0].id);
    }
}
