//! The step form state machine.
//!
//! ```text
//! Editing(i) --advance, valid--> Editing(i+1)        i < N-1
//! Editing(i) --retreat-------->  Editing(i-1)        i > 0
//! Editing(N-1) --submit, valid--> Submitting
//! Submitting --success--> Done
//! Submitting --failure--> Error --edit / dismiss--> Editing(N-1)
//! Error --submit, valid--> Submitting
//! any --reset--> Editing(0)
//! ```
//!
//! While `Submitting`, every interaction is ignored so that at most one
//! scoring call is in flight per session.

use std::sync::Arc;

use ovaware_core::catalog::{self, Section};
use ovaware_core::validation::{validate_record, validate_section};
use ovaware_core::{
    CoreError, FieldErrors, FieldValue, QuestionnaireRecord, RiskAssessment, ScoringFailure,
    ScoringOutcome,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::coordinator::SubmissionCoordinator;
use crate::sink::ResultSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Editing,
    /// Waiting on the scorer. The form is locked.
    Submitting,
    /// The last submission failed; still on the final step with data intact.
    Error,
    Done,
}

/// Which fields a step check covers.
///
/// `WholeRecord` mirrors a form that triggers validation on every field even
/// though only one section is visible. It can block advancement on fields the
/// user has not reached yet, so `CurrentSection` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationScope {
    #[default]
    CurrentSection,
    WholeRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardState {
    pub current_step: usize,
    pub direction: Direction,
    pub values: QuestionnaireRecord,
    pub errors: FieldErrors,
    /// Form-level banner for the last failed submission.
    pub failure: Option<ScoringFailure>,
    pub phase: Phase,
}

impl WizardState {
    fn fresh(defaults: QuestionnaireRecord) -> Self {
        Self {
            current_step: 0,
            direction: Direction::Forward,
            values: defaults,
            errors: FieldErrors::new(),
            failure: None,
            phase: Phase::Editing,
        }
    }
}

/// Step indicator data: "Step 2 of 5: Reproductive History".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progress {
    pub step: usize,
    pub total: usize,
    pub percent: f64,
    pub title: &'static str,
}

/// Result of a submit request.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStatus {
    /// Scored; the result is in the sink and the caller should show it.
    Completed(RiskAssessment),
    /// Scoring failed; the form stays on the last step.
    Failed(ScoringFailure),
    /// Not submitted: wrong step, invalid fields, already in flight, or a
    /// coordinator wired to another sink.
    Rejected,
}

pub struct StepFormController {
    state: WizardState,
    scope: ValidationScope,
    sink: Arc<ResultSink>,
}

impl StepFormController {
    pub fn new(defaults: QuestionnaireRecord, sink: Arc<ResultSink>) -> Self {
        Self {
            state: WizardState::fresh(defaults),
            scope: ValidationScope::default(),
            sink,
        }
    }

    /// A controller that resets the sink `coordinator` publishes to.
    pub fn for_coordinator(
        defaults: QuestionnaireRecord,
        coordinator: &SubmissionCoordinator,
    ) -> Self {
        Self::new(defaults, coordinator.sink().clone())
    }

    pub fn with_scope(mut self, scope: ValidationScope) -> Self {
        self.scope = scope;
        self
    }

    /// Start over with `defaults`: step 0, no errors.
    pub fn initialize(&mut self, defaults: QuestionnaireRecord) {
        self.state = WizardState::fresh(defaults);
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step
    }

    pub fn values(&self) -> &QuestionnaireRecord {
        &self.state.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.state.errors
    }

    pub fn failure(&self) -> Option<&ScoringFailure> {
        self.state.failure.as_ref()
    }

    pub fn scope(&self) -> ValidationScope {
        self.scope
    }

    pub fn step_count(&self) -> usize {
        catalog::step_count()
    }

    pub fn current_section(&self) -> &'static Section {
        &catalog::sections()[self.state.current_step]
    }

    pub fn is_last_step(&self) -> bool {
        self.state.current_step + 1 == self.step_count()
    }

    /// True while a submission is in flight.
    pub fn is_locked(&self) -> bool {
        self.state.phase == Phase::Submitting
    }

    pub fn progress(&self) -> Progress {
        let total = self.step_count();
        let step = self.state.current_step + 1;
        Progress {
            step,
            total,
            percent: step as f64 / total as f64 * 100.0,
            title: &self.current_section().title,
        }
    }

    /// Edit one answer. Returns `Ok(false)` when the form is locked or done.
    pub fn set_field(&mut self, path: &str, value: FieldValue) -> Result<bool, CoreError> {
        if matches!(self.state.phase, Phase::Submitting | Phase::Done) {
            debug!(path, phase = ?self.state.phase, "ignoring edit");
            return Ok(false);
        }

        self.state.values.set(path, value)?;
        self.state.errors.remove(path);

        if self.state.phase == Phase::Error {
            self.dismiss_error();
        }
        Ok(true)
    }

    /// Validate the fields covered by the current scope, replacing `errors`.
    pub fn validate_current_step(&mut self) -> bool {
        if matches!(self.state.phase, Phase::Submitting | Phase::Done) {
            return false;
        }

        self.state.errors = match self.scope {
            ValidationScope::CurrentSection => {
                validate_section(&self.state.values, self.current_section())
            }
            ValidationScope::WholeRecord => validate_record(&self.state.values),
        };

        if !self.state.errors.is_empty() {
            debug!(
                step = self.state.current_step,
                invalid_fields = self.state.errors.len(),
                "step validation failed"
            );
        }
        self.state.errors.is_empty()
    }

    /// Move to the next step if the current one is valid. Returns whether it moved.
    pub fn advance(&mut self) -> bool {
        if self.state.phase != Phase::Editing || self.is_last_step() {
            return false;
        }
        if !self.validate_current_step() {
            return false;
        }

        self.state.current_step += 1;
        self.state.direction = Direction::Forward;
        debug!(step = self.state.current_step, "advanced");
        true
    }

    /// Go back one step, keeping every entered value. Returns whether it moved.
    pub fn retreat(&mut self) -> bool {
        if !matches!(self.state.phase, Phase::Editing | Phase::Error) || self.state.current_step == 0
        {
            return false;
        }

        self.state.current_step -= 1;
        self.state.direction = Direction::Backward;
        self.state.errors.clear();
        self.state.failure = None;
        self.state.phase = Phase::Editing;
        debug!(step = self.state.current_step, "retreated");
        true
    }

    /// Lock the form and hand out the record to score.
    ///
    /// Returns `None` (and leaves the state untouched apart from `errors`)
    /// unless on the last step, not already submitting, and valid.
    pub fn begin_submit(&mut self) -> Option<QuestionnaireRecord> {
        if !matches!(self.state.phase, Phase::Editing | Phase::Error) || !self.is_last_step() {
            debug!(phase = ?self.state.phase, step = self.state.current_step, "submit rejected");
            return None;
        }
        if !self.validate_current_step() {
            return None;
        }

        self.state.phase = Phase::Submitting;
        self.state.failure = None;
        info!("assessment submitted");
        Some(self.state.values.clone())
    }

    /// Apply the outcome of the in-flight submission.
    pub fn complete_submit(&mut self, outcome: ScoringOutcome) -> SubmitStatus {
        if self.state.phase != Phase::Submitting {
            warn!(phase = ?self.state.phase, "outcome received with no submission in flight");
            return SubmitStatus::Rejected;
        }

        match outcome {
            ScoringOutcome::Success(assessment) => {
                self.state.phase = Phase::Done;
                self.state.errors.clear();
                SubmitStatus::Completed(assessment)
            }
            ScoringOutcome::Failure(failure) => {
                self.state.phase = Phase::Error;
                self.state.errors = failure.field_errors.clone();
                self.state.failure = Some(failure.clone());
                SubmitStatus::Failed(failure)
            }
        }
    }

    /// Validate, lock, score, and apply the outcome.
    ///
    /// Rejected when `coordinator` publishes to a different sink than the
    /// one [`reset`](Self::reset) clears.
    pub async fn submit(&mut self, coordinator: &SubmissionCoordinator) -> SubmitStatus {
        if !Arc::ptr_eq(&self.sink, coordinator.sink()) {
            warn!("submit rejected: coordinator publishes to a different result sink");
            return SubmitStatus::Rejected;
        }
        let Some(record) = self.begin_submit() else {
            return SubmitStatus::Rejected;
        };
        let outcome = coordinator.submit(&record).await;
        self.complete_submit(outcome)
    }

    /// Close the failure banner and return to editing the last step.
    pub fn dismiss_error(&mut self) {
        if self.state.phase == Phase::Error {
            self.state.phase = Phase::Editing;
            self.state.failure = None;
        }
    }

    /// "Start new assessment": fresh state and an empty result sink.
    ///
    /// Ignored while a submission is in flight; returns whether it ran.
    pub fn reset(&mut self, defaults: QuestionnaireRecord) -> bool {
        if self.is_locked() {
            warn!("reset ignored while a submission is in flight");
            return false;
        }
        self.sink.clear();
        self.initialize(defaults);
        info!("assessment reset");
        true
    }
}
