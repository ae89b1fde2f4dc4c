//! ovaware-assessment
//!
//! The multi-step assessment flow:
//!
//! - [`StepFormController`]: wizard state, step gating, submission lock
//! - [`SubmissionCoordinator`]: calls the scorer and classifies the result
//! - [`ResultSink`]: hands the latest result to the results view
//!
//! The sink is created by the caller and shared explicitly; only the
//! coordinator can publish into it and only a wizard reset can clear it.

pub mod coordinator;
pub mod sink;
pub mod wizard;

pub use crate::coordinator::SubmissionCoordinator;
pub use crate::sink::{ResultSink, ResultsView};
pub use crate::wizard::{
    Direction, Phase, StepFormController, SubmitStatus, ValidationScope, WizardState,
};
