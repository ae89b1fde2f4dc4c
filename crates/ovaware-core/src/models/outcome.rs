use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::validation::FieldErrors;

/// Risk band reported alongside the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        };
        f.write_str(name)
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "moderate" => Ok(RiskLevel::Moderate),
            "high" => Ok(RiskLevel::High),
            other => Err(format!("unknown risk level '{other}'")),
        }
    }
}

/// A successfully scored assessment, as shown on the results view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskAssessment {
    pub score: f64,
    pub level: RiskLevel,
    pub factors: Vec<String>,
    pub recommendation: String,
}

/// Why a submission attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FailureKind {
    /// The record did not pass validation; the scorer was never called.
    Validation,
    /// The scorer could not be reached or reported a failure status.
    Transport,
    /// The scorer answered, but not with something we can read.
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Validation => "validation",
            FailureKind::Transport => "transport",
            FailureKind::MalformedResponse => "malformed_response",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoringFailure {
    pub kind: FailureKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "FieldErrors::is_empty")]
    pub field_errors: FieldErrors,
}

/// Result of exactly one submission attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum ScoringOutcome {
    Success(RiskAssessment),
    Failure(ScoringFailure),
}

impl ScoringOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ScoringOutcome::Success(_))
    }
}
