//! # Drone Console
//!
//! Operator console for the disaster-response dispatch system.
//!
//! ## Features
//!
//! - Mission triage board
//! - Drone assignment recommendations
//! - Landing safety checks
//! - Synthetic fleet snapshots for demos

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod config;
pub mod simulate;
pub mod snapshot;

pub use config::{Config, ReportFormat};
pub use simulate::FleetGenerator;
