//! Scoring error types.

use drone_domain::DomainError;
use thiserror::Error;
use uuid::Uuid;

/// Scoring errors.
///
/// Missing optional telemetry is never an error; it degrades the affected
/// factor instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TriageError {
    /// A structurally required field is absent or has the wrong shape
    #[error("Malformed input: {0}")]
    MalformedInput(#[from] DomainError),

    /// Mission referenced by the caller is not in the snapshot
    #[error("Mission not found: {0}")]
    MissionNotFound(Uuid),

    /// Drone referenced by the caller is not in the snapshot
    #[error("Drone not found: {0}")]
    DroneNotFound(Uuid),

    /// Landing safety needs at least one telemetry snapshot
    #[error("No telemetry found for drone {0}")]
    NoTelemetry(Uuid),

    /// Report serialization failure
    #[error("Report conversion error: {0}")]
    Conversion(String),
}

/// Result type for scoring operations.
pub type Result<T> = std::result::Result<T, TriageError>;
