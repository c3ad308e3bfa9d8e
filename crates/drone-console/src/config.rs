//! # Console Configuration
//!
//! Environment-based configuration for the operator console. Command-line
//! flags override anything set here.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Output format for boards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Markdown,
    Json,
}

impl FromStr for ReportFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Invalid {
                key: "DRONE_CONSOLE_FORMAT",
                value: other.to_string(),
            }),
        }
    }
}

/// Console configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Fleet snapshot to score
    pub snapshot_path: PathBuf,

    /// Board output format
    pub format: ReportFormat,

    /// Refresh cadence in watch mode
    pub refresh_interval_ms: u64,

    /// Logging level / filter directive
    pub log_level: String,

    /// Emit logs as JSON lines
    pub log_json: bool,
}

/// Configuration errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let format = match lookup("DRONE_CONSOLE_FORMAT") {
            Some(v) => v.parse()?,
            None => ReportFormat::default(),
        };

        let refresh_interval_ms = match lookup("DRONE_CONSOLE_INTERVAL_MS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or(ConfigError::Invalid {
                    key: "DRONE_CONSOLE_INTERVAL_MS",
                    value: v,
                })?,
            None => 5000,
        };

        Ok(Self {
            snapshot_path: lookup("DRONE_CONSOLE_SNAPSHOT")
                .map_or_else(|| PathBuf::from("fleet.json"), PathBuf::from),

            format,

            refresh_interval_ms,

            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),

            log_json: lookup("LOG_JSON")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }
}
