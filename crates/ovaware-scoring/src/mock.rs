use ovaware_core::{QuestionnaireRecord, RiskAssessment, RiskLevel};

use crate::error::ScoringError;
use crate::response::ScoringResponse;
use crate::{BoxFuture, ScoringCollaborator};

/// Canned scorer for demos and offline runs. Ignores the record.
#[derive(Debug, Clone)]
pub struct MockScorer {
    assessment: RiskAssessment,
}

impl MockScorer {
    pub fn new(assessment: RiskAssessment) -> Self {
        Self { assessment }
    }
}

impl Default for MockScorer {
    fn default() -> Self {
        Self::new(RiskAssessment {
            score: 45.0,
            level: RiskLevel::Moderate,
            factors: [
                "Age",
                "Family History",
                "Genetic Mutations",
                "Lifestyle",
                "Medical History",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            recommendation: "Based on your risk factors, we recommend regular check-ups and \
                             lifestyle modifications."
                .to_string(),
        })
    }
}

impl ScoringCollaborator for MockScorer {
    fn name(&self) -> &str {
        "mock"
    }

    fn score<'a>(
        &'a self,
        _record: &'a QuestionnaireRecord,
    ) -> BoxFuture<'a, Result<serde_json::Value, ScoringError>> {
        Box::pin(async move {
            serde_json::to_value(ScoringResponse::from(&self.assessment))
                .map_err(|e| ScoringError::Encode(e.to_string()))
        })
    }
}
