//! ovaware-core
//!
//! Pure domain types for the OvaAware questionnaire: the record shape, the
//! field catalog that drives the step form, validation, and scoring result
//! types. No I/O. This is the shared vocabulary of the other crates.

pub mod catalog;
pub mod error;
pub mod models;
pub mod validation;

pub use crate::catalog::{Constraint, FieldKind, FieldSpec, Section};
pub use crate::error::CoreError;
pub use crate::models::outcome::{
    FailureKind, RiskAssessment, RiskLevel, ScoringFailure, ScoringOutcome,
};
pub use crate::models::record::{FieldValue, QuestionnaireRecord};
pub use crate::validation::FieldErrors;
