//! The one response contract the assessment flow accepts.
//!
//! ```json
//! {
//!   "riskScore": 62,
//!   "riskLevel": "High",
//!   "keyInfluencingFactors": ["Age", "Family History"],
//!   "nextSteps": "Consult a specialist"
//! }
//! ```
//!
//! Anything else (the bare `{ "risk": 1.4 }` multiplier, missing keys, an
//! unknown level) is a [`ScoringError::Malformed`].

use ovaware_core::{RiskAssessment, RiskLevel};
use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResponse {
    pub risk_score: f64,
    pub risk_level: String,
    pub key_influencing_factors: Vec<String>,
    pub next_steps: String,
}

impl From<&RiskAssessment> for ScoringResponse {
    fn from(assessment: &RiskAssessment) -> Self {
        Self {
            risk_score: assessment.score,
            risk_level: assessment.level.to_string(),
            key_influencing_factors: assessment.factors.clone(),
            next_steps: assessment.recommendation.clone(),
        }
    }
}

/// Convert a raw collaborator answer into a [`RiskAssessment`].
pub fn normalize(raw: serde_json::Value) -> Result<RiskAssessment, ScoringError> {
    if !raw.is_object() {
        return Err(ScoringError::Malformed(format!(
            "expected a JSON object, got {raw}"
        )));
    }

    let response: ScoringResponse = serde_json::from_value(raw)
        .map_err(|e| ScoringError::Malformed(e.to_string()))?;

    if !response.risk_score.is_finite() || response.risk_score < 0.0 {
        return Err(ScoringError::Malformed(format!(
            "riskScore must be a non-negative number, got {}",
            response.risk_score
        )));
    }

    let level: RiskLevel = response
        .risk_level
        .parse()
        .map_err(ScoringError::Malformed)?;

    Ok(RiskAssessment {
        score: response.risk_score,
        level,
        factors: response.key_influencing_factors,
        recommendation: response.next_steps,
    })
}
