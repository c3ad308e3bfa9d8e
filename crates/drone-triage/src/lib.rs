//! # Drone Triage
//!
//! Deterministic scoring engine for the dispatch console.
//!
//! ## Features
//!
//! - Drone-to-mission compatibility scoring
//! - Mission triage ranking under partial telemetry
//! - Stable rank ordering for operator display
//! - Landing-zone safety assessment
//! - Markdown and JSON board rendering
//!
//! Every scorer is a pure function over immutable snapshots: no I/O, no
//! shared state, no logging.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod board;
pub mod compatibility;
pub mod error;
pub mod factors;
pub mod ranking;
pub mod reports;
pub mod safety;
pub mod score;
pub mod triage;

#[cfg(test)]
pub(crate) mod test_support;

pub use board::{CompatibilityBoard, RejectedRecord, TriageBoard, compatibility_board, landing_safety, triage_board};
pub use compatibility::{COMPATIBILITY_FACTORS, recommend_drone, score_candidates, score_compatibility};
pub use error::TriageError;
pub use ranking::{Ranked, rank};
pub use safety::{SafetyScore, score_landing_safety};
pub use score::{Factor, FactorTable, MAX_SCORE, ScoreResult};
pub use triage::{TRIAGE_FACTORS, rank_missions, score_missions, score_triage};
