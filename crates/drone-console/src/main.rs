//! Drone Dispatch Console CLI
//!
//! Loads a fleet snapshot, scores it, and prints ranked boards.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use drone_console::{Config, FleetGenerator, ReportFormat, snapshot};
use drone_domain::FleetSnapshot;
use drone_triage::{compatibility_board, landing_safety, reports, triage_board};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "drone-console")]
#[command(about = "Score and rank drones and missions for dispatch")]
struct Args {
    /// Fleet snapshot JSON (overrides DRONE_CONSOLE_SNAPSHOT)
    #[arg(short, long, global = true)]
    snapshot: Option<PathBuf>,

    /// Output format (overrides DRONE_CONSOLE_FORMAT)
    #[arg(short, long, global = true, value_enum)]
    format: Option<ReportFormat>,

    /// Re-read the snapshot and recompute on a fixed cadence
    #[arg(long, global = true)]
    watch: bool,

    /// Watch cadence in milliseconds (overrides DRONE_CONSOLE_INTERVAL_MS)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    interval_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Rank all missions by urgency
    Triage,

    /// Rank online drones for one mission
    Assign {
        /// Mission ID
        #[arg(short, long)]
        mission: Uuid,
    },

    /// Landing safety score for one drone
    Safety {
        /// Drone ID
        #[arg(short, long)]
        drone: Uuid,
    },

    /// Write a synthetic fleet snapshot
    Simulate {
        /// Number of drones
        #[arg(short, long, default_value = "8")]
        drones: usize,

        /// Number of missions
        #[arg(short, long, default_value = "12")]
        missions: usize,

        /// RNG seed for a reproducible fleet
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env().context("Invalid console configuration")?;
    init_tracing(&config);

    let snapshot_path = args.snapshot.clone().unwrap_or(config.snapshot_path);
    let format = args.format.unwrap_or(config.format);
    let interval = Duration::from_millis(args.interval_ms.unwrap_or(config.refresh_interval_ms));

    if let Command::Simulate {
        drones,
        missions,
        seed,
    } = args.command
    {
        let mut generator = match seed {
            Some(seed) => FleetGenerator::seeded(seed)?,
            None => FleetGenerator::from_entropy()?,
        };
        let fleet = generator.snapshot(drones, missions, Utc::now());
        snapshot::save(&snapshot_path, &fleet)
            .await
            .with_context(|| format!("Failed to write {}", snapshot_path.display()))?;
        info!(
            "Wrote {} drones, {} missions to {}",
            drones,
            missions,
            snapshot_path.display()
        );
        return Ok(());
    }

    if !args.watch {
        let fleet = load(&snapshot_path).await?;
        println!("{}", render(&args.command, &fleet, format)?);
        return Ok(());
    }

    info!("Watching {} every {:?}", snapshot_path.display(), interval);
    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // A bad refresh keeps the console running; the next tick retries
                match load(&snapshot_path).await.and_then(|fleet| render(&args.command, &fleet, format)) {
                    Ok(output) => println!("{output}"),
                    Err(err) => warn!("Refresh failed: {err:#}"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Console stopped");
                break;
            }
        }
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("drone_console={}", config.log_level)));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn load(path: &Path) -> Result<FleetSnapshot> {
    snapshot::load(path)
        .await
        .with_context(|| format!("Failed to load snapshot {}", path.display()))
}

/// Score the snapshot for one command and render the board.
fn render(command: &Command, fleet: &FleetSnapshot, format: ReportFormat) -> Result<String> {
    let now = Utc::now();

    let output = match command {
        Command::Triage => {
            let board = triage_board(fleet, now);
            for rejected in &board.rejected {
                warn!("Cannot score {}: {}", rejected.label, rejected.reason);
            }
            info!(
                "Triaged {} missions ({} rejected)",
                board.entries.len(),
                board.rejected.len()
            );
            match format {
                ReportFormat::Markdown => board.to_markdown(),
                ReportFormat::Json => reports::to_json(&board)?,
            }
        }
        Command::Assign { mission } => {
            let board = compatibility_board(fleet, *mission, now)
                .with_context(|| format!("Cannot score mission {mission}"))?;
            for rejected in &board.rejected {
                warn!("Cannot score {}: {}", rejected.label, rejected.reason);
            }
            if let Some(best) = board.entries.first() {
                info!(
                    "Best fit for {}: {} ({:.0})",
                    board.mission.code, best.entity.callsign, best.score.total
                );
            }
            match format {
                ReportFormat::Markdown => board.to_markdown(),
                ReportFormat::Json => reports::to_json(&board)?,
            }
        }
        Command::Safety { drone } => {
            let score = landing_safety(fleet, *drone, now)
                .with_context(|| format!("Cannot assess drone {drone}"))?;
            match format {
                ReportFormat::Markdown => score.to_markdown(),
                ReportFormat::Json => reports::to_json(&score)?,
            }
        }
        Command::Simulate { .. } => String::new(),
    };

    Ok(output)
}
