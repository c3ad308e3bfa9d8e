//! Factor functions.
//!
//! Each function maps one domain fact to a bounded, non-negative
//! contribution. Missing telemetry reads as the worst case for that factor.

use drone_domain::{DroneStatus, Priority};

// =============================================================================
// COMPATIBILITY FACTORS
// =============================================================================

/// Battery: >70 → 30, >50 → 20, >30 → 10, else 0. Unknown reads as 0 %.
#[must_use]
pub fn battery(battery_percent: Option<f32>) -> f64 {
    let pct = battery_percent.unwrap_or(0.0);
    if pct > 70.0 {
        30.0
    } else if pct > 50.0 {
        20.0
    } else if pct > 30.0 {
        10.0
    } else {
        0.0
    }
}

/// Payload margin of capacity over estimated weight.
///
/// margin ≥ +2 kg → 25, margin ≥ 0 → 15, capacity ≥ 80 % of weight → 5.
#[must_use]
pub fn payload_margin(max_payload_kg: f64, estimated_weight_kg: f64) -> f64 {
    let margin = max_payload_kg - estimated_weight_kg;
    if margin >= 2.0 {
        25.0
    } else if margin >= 0.0 {
        15.0
    } else if max_payload_kg >= estimated_weight_kg * 0.8 {
        5.0
    } else {
        0.0
    }
}

/// Idle drones are preferred over ones already flying.
#[must_use]
pub fn drone_status(status: DroneStatus) -> f64 {
    match status {
        DroneStatus::Idle => 25.0,
        DroneStatus::Active => 15.0,
        DroneStatus::Maintenance | DroneStatus::Offline => 0.0,
    }
}

/// GPS quality: ≥8 sats → 20, ≥6 → 15, ≥4 → 5. Unknown reads as 0 sats.
#[must_use]
pub fn gps_quality(satellites: Option<u32>) -> f64 {
    match satellites.unwrap_or(0) {
        8.. => 20.0,
        6..=7 => 15.0,
        4..=5 => 5.0,
        _ => 0.0,
    }
}

// =============================================================================
// TRIAGE FACTORS
// =============================================================================

/// Urgency for a mission without an ETA.
pub const UNSCHEDULED_URGENCY: f64 = 10.0;

/// Readiness for a mission with no (resolvable) assigned drone.
pub const UNASSIGNED_READINESS: f64 = 15.0;

/// Priority: (level / 4) × 40.
#[must_use]
pub fn priority(priority: Priority) -> f64 {
    f64::from(priority.level()) / 4.0 * 40.0
}

/// Urgency from hours remaining until ETA (negative when overdue).
#[must_use]
pub fn urgency(hours_to_eta: Option<f64>) -> f64 {
    let Some(hours) = hours_to_eta else {
        return UNSCHEDULED_URGENCY;
    };
    if hours < 0.0 {
        30.0
    } else if hours < 1.0 {
        25.0
    } else if hours < 4.0 {
        20.0
    } else if hours < 12.0 {
        15.0
    } else {
        5.0
    }
}

/// Assigned drone readiness, or the unassigned default.
#[must_use]
pub fn drone_readiness(assigned: Option<(DroneStatus, Option<f32>)>) -> f64 {
    let Some((status, battery_percent)) = assigned else {
        return UNASSIGNED_READINESS;
    };
    if !status.is_online() {
        return 0.0;
    }
    let pct = battery_percent.unwrap_or(0.0);
    if pct > 70.0 {
        20.0
    } else if pct > 50.0 {
        15.0
    } else if pct > 30.0 {
        10.0
    } else {
        5.0
    }
}

/// Environment: safe → 10, unsafe → 0.
#[must_use]
pub fn environment(safe: bool) -> f64 {
    if safe { 10.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battery_thresholds_are_strict() {
        assert_eq!(battery(None), 0.0);
        assert_eq!(battery(Some(30.0)), 0.0);
        assert_eq!(battery(Some(30.5)), 10.0);
        assert_eq!(battery(Some(50.0)), 10.0);
        assert_eq!(battery(Some(51.0)), 20.0);
        assert_eq!(battery(Some(70.0)), 20.0);
        assert_eq!(battery(Some(71.0)), 30.0);
        assert_eq!(battery(Some(100.0)), 30.0);
    }

    #[test]
    fn test_payload_margin_bands() {
        // 2 payloads = 3 kg
        assert_eq!(payload_margin(5.0, 3.0), 25.0);
        assert_eq!(payload_margin(4.9, 3.0), 15.0);
        assert_eq!(payload_margin(3.0, 3.0), 15.0);
        assert_eq!(payload_margin(2.5, 3.0), 5.0);
        assert_eq!(payload_margin(2.3, 3.0), 0.0);
        // 3.0 * 0.8 rounds up past 2.4, so exactly 80% misses the band
        assert_eq!(payload_margin(2.4, 3.0), 0.0);
        // 4.5 * 0.8 is exactly 3.6
        assert_eq!(payload_margin(3.6, 4.5), 5.0);
        // no payload at all
        assert_eq!(payload_margin(5.0, 0.0), 25.0);
        assert_eq!(payload_margin(1.0, 0.0), 15.0);
    }

    #[test]
    fn test_status_scores() {
        assert_eq!(drone_status(DroneStatus::Idle), 25.0);
        assert_eq!(drone_status(DroneStatus::Active), 15.0);
        assert_eq!(drone_status(DroneStatus::Maintenance), 0.0);
        assert_eq!(drone_status(DroneStatus::Offline), 0.0);
    }

    #[test]
    fn test_gps_bands() {
        assert_eq!(gps_quality(None), 0.0);
        assert_eq!(gps_quality(Some(3)), 0.0);
        assert_eq!(gps_quality(Some(4)), 5.0);
        assert_eq!(gps_quality(Some(6)), 15.0);
        assert_eq!(gps_quality(Some(8)), 20.0);
        assert_eq!(gps_quality(Some(14)), 20.0);
    }

    #[test]
    fn test_priority_scale() {
        assert_eq!(priority(Priority::Low), 10.0);
        assert_eq!(priority(Priority::Medium), 20.0);
        assert_eq!(priority(Priority::High), 30.0);
        assert_eq!(priority(Priority::Critical), 40.0);
    }

    #[test]
    fn test_urgency_bands() {
        assert_eq!(urgency(None), UNSCHEDULED_URGENCY);
        assert_eq!(urgency(Some(-0.01)), 30.0);
        assert_eq!(urgency(Some(0.0)), 25.0);
        assert_eq!(urgency(Some(0.99)), 25.0);
        assert_eq!(urgency(Some(1.0)), 20.0);
        assert_eq!(urgency(Some(3.99)), 20.0);
        assert_eq!(urgency(Some(4.0)), 15.0);
        assert_eq!(urgency(Some(12.0)), 5.0);
        assert_eq!(urgency(Some(240.0)), 5.0);
    }

    #[test]
    fn test_readiness() {
        assert_eq!(drone_readiness(None), UNASSIGNED_READINESS);
        assert_eq!(drone_readiness(Some((DroneStatus::Idle, Some(90.0)))), 20.0);
        assert_eq!(drone_readiness(Some((DroneStatus::Active, Some(60.0)))), 15.0);
        assert_eq!(drone_readiness(Some((DroneStatus::Active, Some(40.0)))), 10.0);
        assert_eq!(drone_readiness(Some((DroneStatus::Idle, Some(10.0)))), 5.0);
        assert_eq!(drone_readiness(Some((DroneStatus::Idle, None))), 5.0);
        assert_eq!(drone_readiness(Some((DroneStatus::Offline, Some(99.0)))), 0.0);
        assert_eq!(drone_readiness(Some((DroneStatus::Maintenance, Some(99.0)))), 0.0);
    }

    #[test]
    fn test_environment() {
        assert_eq!(environment(true), 10.0);
        assert_eq!(environment(false), 0.0);
    }
}
