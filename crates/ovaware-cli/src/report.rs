//! Plain-text rendering for the terminal.

use std::fmt::Write;

use ovaware_core::models::history::HistoryEntry;
use ovaware_core::{FieldErrors, RiskAssessment};

pub fn render_assessment(assessment: &RiskAssessment) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Risk score: {:.1}", assessment.score);
    let _ = writeln!(out, "Risk level: {}", assessment.level);
    if !assessment.factors.is_empty() {
        let _ = writeln!(out, "Key influencing factors:");
        for factor in &assessment.factors {
            let _ = writeln!(out, "  - {factor}");
        }
    }
    let _ = writeln!(out, "Next steps: {}", assessment.recommendation);
    out
}

pub fn render_field_errors(errors: &FieldErrors) -> String {
    let mut out = String::new();
    for (path, messages) in errors {
        for message in messages {
            let _ = writeln!(out, "  {path}: {message}");
        }
    }
    out
}

pub fn render_history_line(entry: &HistoryEntry) -> String {
    format!(
        "{}  {:<8}  {:>6.1}  age {}",
        entry.date.strftime("%Y-%m-%d %H:%M"),
        entry.result.risk_level.to_string(),
        entry.result.score,
        entry.data.demographics.age,
    )
}
