use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::outcome::{RiskAssessment, RiskLevel};
use super::record::QuestionnaireRecord;

/// One stored assessment: the answers and the headline result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub date: jiff::Timestamp,
    pub data: QuestionnaireRecord,
    pub result: HistoryResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HistoryResult {
    pub risk_level: RiskLevel,
    pub score: f64,
}

impl From<&RiskAssessment> for HistoryResult {
    fn from(assessment: &RiskAssessment) -> Self {
        Self {
            risk_level: assessment.level,
            score: assessment.score,
        }
    }
}
