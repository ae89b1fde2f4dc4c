use std::sync::Arc;

use ovaware_core::validation::validate_record;
use ovaware_core::{FailureKind, QuestionnaireRecord, ScoringFailure, ScoringOutcome};
use ovaware_scoring::ScoringCollaborator;
use ovaware_scoring::response::normalize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::sink::ResultSink;

const INVALID_INPUT_MESSAGE: &str = "Invalid input data.";

/// Bridges a finished record to the scoring collaborator.
///
/// Every error is turned into [`ScoringOutcome::Failure`]; nothing escapes
/// to the caller. A successful result is published to the sink.
pub struct SubmissionCoordinator {
    collaborator: Arc<dyn ScoringCollaborator>,
    sink: Arc<ResultSink>,
}

impl SubmissionCoordinator {
    pub fn new(collaborator: Arc<dyn ScoringCollaborator>, sink: Arc<ResultSink>) -> Self {
        Self { collaborator, sink }
    }

    pub fn sink(&self) -> &Arc<ResultSink> {
        &self.sink
    }

    /// Score one record. Makes at most one collaborator call.
    pub async fn submit(&self, record: &QuestionnaireRecord) -> ScoringOutcome {
        let submission_id = Uuid::new_v4();

        let field_errors = validate_record(record);
        if !field_errors.is_empty() {
            warn!(
                %submission_id,
                invalid_fields = field_errors.len(),
                "record failed validation, not calling scorer"
            );
            return ScoringOutcome::Failure(ScoringFailure {
                kind: FailureKind::Validation,
                message: INVALID_INPUT_MESSAGE.to_string(),
                field_errors,
            });
        }

        info!(
            %submission_id,
            scorer = self.collaborator.name(),
            "submitting assessment for scoring"
        );

        match self.collaborator.score(record).await.and_then(normalize) {
            Ok(assessment) => {
                info!(
                    %submission_id,
                    score = assessment.score,
                    level = %assessment.level,
                    "assessment scored"
                );
                self.sink.publish(assessment.clone());
                ScoringOutcome::Success(assessment)
            }
            Err(e) => {
                let kind = e.kind();
                error!(%submission_id, kind = %kind, error = %e, "scoring failed");
                ScoringOutcome::Failure(ScoringFailure {
                    kind,
                    message: format!(
                        "An error occurred while processing your assessment: {e}"
                    ),
                    field_errors: Default::default(),
                })
            }
        }
    }
}
