//! Fleet snapshot loading and saving.

use drone_domain::FleetSnapshot;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Snapshot I/O errors
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid snapshot JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read a snapshot from a JSON file.
pub async fn load(path: &Path) -> Result<FleetSnapshot, SnapshotError> {
    let raw = tokio::fs::read_to_string(path).await?;
    let snapshot: FleetSnapshot = serde_json::from_str(&raw)?;
    info!(
        path = %path.display(),
        drones = snapshot.drones.len(),
        missions = snapshot.missions.len(),
        "Loaded fleet snapshot"
    );
    Ok(snapshot)
}

/// Write a snapshot as pretty JSON.
pub async fn save(path: &Path, snapshot: &FleetSnapshot) -> Result<(), SnapshotError> {
    let json = serde_json::to_string_pretty(snapshot)?;
    tokio::fs::write(path, json).await?;
    debug!(path = %path.display(), "Wrote fleet snapshot");
    Ok(())
}
