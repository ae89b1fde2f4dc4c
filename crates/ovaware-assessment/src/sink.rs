use std::sync::{PoisonError, RwLock};

use ovaware_core::RiskAssessment;

/// Holds at most one current assessment result.
///
/// Written by [`SubmissionCoordinator`](crate::SubmissionCoordinator) on a
/// successful submission and cleared by a wizard reset. Readers must treat
/// an empty sink as "no assessment yet".
#[derive(Debug, Default)]
pub struct ResultSink {
    current: RwLock<Option<RiskAssessment>>,
}

impl ResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current result, if any.
    pub fn current(&self) -> Option<RiskAssessment> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    pub(crate) fn publish(&self, assessment: RiskAssessment) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(assessment);
    }

    pub(crate) fn clear(&self) {
        self.current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

/// What the results page should show.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    Ready(RiskAssessment),
    /// Nothing to show; send the user back to the form.
    RedirectToForm,
}

impl ResultsView {
    pub fn resolve(sink: &ResultSink) -> Self {
        match sink.current() {
            Some(assessment) => ResultsView::Ready(assessment),
            None => ResultsView::RedirectToForm,
        }
    }
}
