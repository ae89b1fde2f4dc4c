#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ovaware_assessment::{ResultSink, StepFormController, SubmissionCoordinator};
use ovaware_core::QuestionnaireRecord;
use ovaware_scoring::{BoxFuture, ScoringCollaborator, ScoringError};
use serde_json::{Value, json};

/// What a [`ScriptedScorer`] does when called.
pub enum Script {
    Respond(Value),
    Fail(fn() -> ScoringError),
}

/// Collaborator with a fixed answer that counts its calls.
pub struct ScriptedScorer {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedScorer {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ScoringCollaborator for ScriptedScorer {
    fn name(&self) -> &str {
        "scripted"
    }

    fn score<'a>(
        &'a self,
        _record: &'a QuestionnaireRecord,
    ) -> BoxFuture<'a, Result<Value, ScoringError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            match &self.script {
                Script::Respond(value) => Ok(value.clone()),
                Script::Fail(make) => Err(make()),
            }
        })
    }
}

pub fn high_risk_response() -> Value {
    json!({
        "riskScore": 62,
        "riskLevel": "High",
        "keyInfluencingFactors": ["Age", "Family History"],
        "nextSteps": "Consult a specialist"
    })
}

pub struct Harness {
    pub scorer: Arc<ScriptedScorer>,
    pub sink: Arc<ResultSink>,
    pub coordinator: SubmissionCoordinator,
    pub wizard: StepFormController,
}

pub fn harness(script: Script) -> Harness {
    let scorer = ScriptedScorer::new(script);
    let sink = Arc::new(ResultSink::new());
    let coordinator = SubmissionCoordinator::new(scorer.clone(), sink.clone());
    let wizard = StepFormController::for_coordinator(QuestionnaireRecord::default(), &coordinator);
    Harness {
        scorer,
        sink,
        coordinator,
        wizard,
    }
}

/// Advance through every step; panics if a step refuses.
pub fn walk_to_last_step(wizard: &mut StepFormController) {
    while !wizard.is_last_step() {
        assert!(
            wizard.advance(),
            "stuck on step {}: {:?}",
            wizard.current_step(),
            wizard.errors()
        );
    }
}
