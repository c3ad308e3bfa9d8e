//! Report rendering for scored boards.

use crate::board::{CompatibilityBoard, TriageBoard};
use crate::error::{Result, TriageError};
use crate::safety::SafetyScore;
use serde::Serialize;

/// Render any board as pretty JSON.
pub fn to_json<T: Serialize>(board: &T) -> Result<String> {
    serde_json::to_string_pretty(board).map_err(|e| TriageError::Conversion(e.to_string()))
}

fn factor_cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.0}"))
}

fn push_rejected(md: &mut String, rejected: &[crate::board::RejectedRecord]) {
    if rejected.is_empty() {
        return;
    }
    md.push_str("## Rejected Records\n\n");
    for r in rejected {
        md.push_str(&format!("- cannot score {}: {}\n", r.label, r.reason));
    }
    md.push('\n');
}

impl TriageBoard {
    /// Markdown table of missions, most urgent first.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str("# Mission Triage\n\n");
        md.push_str(&format!("**Generated:** {}\n\n", self.generated_at.to_rfc3339()));
        md.push_str(&format!(
            "**Environment:** {}\n\n",
            if self.environment.safe { "SAFE" } else { "UNSAFE" }
        ));

        if self.entries.is_empty() {
            md.push_str("_No missions to triage._\n\n");
        } else {
            md.push_str("| Rank | Mission | Priority | Score | priority | urgency | drone | weather |\n");
            md.push_str("|------|---------|----------|-------|----------|---------|-------|---------|\n");
            for entry in &self.entries {
                let s = &entry.score;
                md.push_str(&format!(
                    "| #{} | {} | {} | {:.0} | {} | {} | {} | {} |\n",
                    entry.rank,
                    entry.entity.code,
                    entry.entity.priority.as_str(),
                    s.total,
                    factor_cell(s.factor("priority")),
                    factor_cell(s.factor("urgency")),
                    factor_cell(s.factor("drone")),
                    factor_cell(s.factor("weather")),
                ));
            }
            md.push('\n');
        }

        let notes: Vec<_> = self
            .entries
            .iter()
            .filter_map(|e| e.entity.note.as_ref().map(|n| (&e.entity.code, n)))
            .collect();
        if !notes.is_empty() {
            md.push_str("## Notes\n\n");
            for (code, note) in notes {
                md.push_str(&format!("- {code}: {note}\n"));
            }
            md.push('\n');
        }

        push_rejected(&mut md, &self.rejected);
        md
    }
}

impl CompatibilityBoard {
    /// Markdown table of candidate drones, best fit first.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str(&format!("# Drone Candidates for {}\n\n", self.mission.code));
        md.push_str(&format!("**Generated:** {}\n\n", self.generated_at.to_rfc3339()));
        md.push_str(&format!(
            "**Route:** {:.1} km, priority {}\n\n",
            self.mission.route_km,
            self.mission.priority.as_str()
        ));

        if self.entries.is_empty() {
            md.push_str("_No online drones available._\n\n");
        } else {
            md.push_str("| Rank | Callsign | Status | Score | battery | payload | status | gps |\n");
            md.push_str("|------|----------|--------|-------|---------|---------|--------|-----|\n");
            for entry in &self.entries {
                let s = &entry.score;
                md.push_str(&format!(
                    "| #{} | {} | {} | {:.0} | {} | {} | {} | {} |\n",
                    entry.rank,
                    entry.entity.callsign,
                    entry.entity.status.as_str(),
                    s.total,
                    factor_cell(s.factor("battery")),
                    factor_cell(s.factor("payload")),
                    factor_cell(s.factor("status")),
                    factor_cell(s.factor("gps")),
                ));
            }
            md.push('\n');
        }

        push_rejected(&mut md, &self.rejected);
        md
    }
}

impl SafetyScore {
    /// Markdown summary of a landing safety assessment.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str(&format!("# Landing Safety: {:.1}\n\n", self.score));
        md.push_str("| Factor | Reading |\n");
        md.push_str("|--------|---------|\n");
        for (name, value) in &self.factors {
            md.push_str(&format!("| {name} | {value:.1} |\n"));
        }
        md.push('\n');
        if !self.recommendations.is_empty() {
            md.push_str("## Recommendations\n\n");
            for r in &self.recommendations {
                md.push_str(&format!("- {r}\n"));
            }
        }
        md
    }
}
