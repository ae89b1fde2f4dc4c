use std::collections::BTreeMap;

use crate::catalog::{self, Constraint, FieldSpec, Section};
use crate::models::record::{FieldValue, QuestionnaireRecord};

/// Field path → messages. Empty means valid.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Check one value against its field's constraint.
pub fn check_field(spec: &FieldSpec, value: &FieldValue) -> Option<String> {
    if value.kind() != spec.kind {
        return Some(format!("{} must be {}", spec.label, spec.kind));
    }
    match &spec.constraint {
        Constraint::Range(bounds) => {
            let number = value.as_f64()?;
            (!bounds.contains(number))
                .then(|| format!("{} must be {}", spec.label, bounds.describe()))
        }
        Constraint::OneOf { allowed } => match value {
            FieldValue::Choice(choice) if allowed.iter().any(|a| a == choice) => None,
            FieldValue::Choice(choice) if choice.trim().is_empty() => {
                Some(format!("{} is required", spec.label))
            }
            _ => Some(format!(
                "{} must be one of: {}",
                spec.label,
                allowed.join(", ")
            )),
        },
        Constraint::Unconstrained => None,
    }
}

/// Validate the given fields of a record.
pub fn validate_fields<'a>(
    record: &QuestionnaireRecord,
    fields: impl IntoIterator<Item = &'a FieldSpec>,
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for spec in fields {
        let message = match record.get(&spec.path) {
            Ok(value) => check_field(spec, &value),
            Err(e) => Some(e.to_string()),
        };
        if let Some(message) = message {
            errors.entry(spec.path.clone()).or_default().push(message);
        }
    }
    errors
}

/// Validate only the fields shown on one step.
pub fn validate_section(record: &QuestionnaireRecord, section: &Section) -> FieldErrors {
    validate_fields(record, &section.fields)
}

/// Validate every field of every section.
pub fn validate_record(record: &QuestionnaireRecord) -> FieldErrors {
    validate_fields(record, catalog::all_fields())
}

/// A record is complete when every field satisfies its constraint.
pub fn is_complete(record: &QuestionnaireRecord) -> bool {
    validate_record(record).is_empty()
}
