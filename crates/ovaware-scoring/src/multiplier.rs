//! Adapter for the legacy risk service that answers with a relative-risk
//! multiplier (`{ "risk": 1.37 }`) instead of the full response contract.

use ovaware_core::{QuestionnaireRecord, RiskLevel};
use serde::Deserialize;
use tracing::debug;

use crate::error::ScoringError;
use crate::response::ScoringResponse;
use crate::{BoxFuture, ScoringCollaborator};

const MULTIPLIER_FACTORS: &[&str] = &[
    "Age",
    "Family History",
    "BMI",
    "Reproductive History",
    "Lifestyle Factors",
];

#[derive(Debug, Deserialize)]
struct MultiplierResponse {
    risk: f64,
}

/// Wraps a collaborator that returns `{ "risk": <multiplier> }` and rewrites
/// its answer into the normalized contract.
pub struct MultiplierAdapter {
    inner: Box<dyn ScoringCollaborator>,
}

impl MultiplierAdapter {
    pub fn new(inner: Box<dyn ScoringCollaborator>) -> Self {
        Self { inner }
    }
}

/// Band a relative-risk multiplier: below 1 is Low, below 2 Moderate.
pub fn level_for_multiplier(risk: f64) -> RiskLevel {
    if risk < 1.0 {
        RiskLevel::Low
    } else if risk < 2.0 {
        RiskLevel::Moderate
    } else {
        RiskLevel::High
    }
}

/// Expand a multiplier into the normalized response.
pub fn expand_multiplier(risk: f64) -> ScoringResponse {
    let level = level_for_multiplier(risk);
    let advice = match level {
        RiskLevel::High => "immediate consultation with a specialist",
        RiskLevel::Moderate => "regular screenings and lifestyle modifications",
        RiskLevel::Low => "annual check-ups and maintaining healthy habits",
    };
    ScoringResponse {
        risk_score: risk * 100.0,
        risk_level: level.to_string(),
        key_influencing_factors: MULTIPLIER_FACTORS.iter().map(|f| f.to_string()).collect(),
        next_steps: format!("Based on your {risk:.2}x increased risk, we recommend: {advice}"),
    }
}

impl ScoringCollaborator for MultiplierAdapter {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn score<'a>(
        &'a self,
        record: &'a QuestionnaireRecord,
    ) -> BoxFuture<'a, Result<serde_json::Value, ScoringError>> {
        Box::pin(async move {
            let raw = self.inner.score(record).await?;
            let parsed: MultiplierResponse = serde_json::from_value(raw).map_err(|e| {
                ScoringError::Malformed(format!("expected a risk multiplier: {e}"))
            })?;
            if !parsed.risk.is_finite() || parsed.risk < 0.0 {
                return Err(ScoringError::Malformed(format!(
                    "risk multiplier must be a non-negative number, got {}",
                    parsed.risk
                )));
            }
            debug!(risk = parsed.risk, "expanding risk multiplier");
            serde_json::to_value(expand_multiplier(parsed.risk))
                .map_err(|e| ScoringError::Encode(e.to_string()))
        })
    }
}
