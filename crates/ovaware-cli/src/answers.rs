//! Answers file: a (possibly partial) section-grouped JSON document.
//!
//! ```json
//! { "demographics": { "age": 45, "race": "Asian" },
//!   "family_history": { "immediate_ovarian": 2 } }
//! ```
//!
//! Missing fields keep their form defaults.

use std::path::Path;

use ovaware_core::FieldValue;
use ovaware_core::catalog;
use serde_json::Value;

/// Parsed answers, grouped by form step.
#[derive(Debug, Clone, Default)]
pub struct Answers {
    steps: Vec<Vec<(String, FieldValue)>>,
}

impl Answers {
    /// Answers for the fields shown on `step`.
    pub fn for_step(&self, step: usize) -> &[(String, FieldValue)] {
        self.steps.get(step).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.steps.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn load_answers(path: &Path) -> eyre::Result<Answers> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read answers at {}: {e}", path.display()))?;
    let json: Value = serde_json::from_str(&contents)?;
    parse_answers(&json)
}

pub fn parse_answers(json: &Value) -> eyre::Result<Answers> {
    let root = json
        .as_object()
        .ok_or_else(|| eyre::eyre!("answers must be a JSON object keyed by section"))?;

    for key in root.keys() {
        if !catalog::sections().iter().any(|s| &s.id == key) {
            tracing::warn!(section = %key, "ignoring unknown section in answers");
        }
    }

    let mut steps = Vec::with_capacity(catalog::step_count());
    for section in catalog::sections() {
        let mut answers = Vec::new();
        if let Some(given) = root.get(&section.id) {
            let given = given
                .as_object()
                .ok_or_else(|| eyre::eyre!("section '{}' must be a JSON object", section.id))?;
            for (field_id, raw) in given {
                let Some(spec) = section.field(field_id) else {
                    tracing::warn!(section = %section.id, field = %field_id, "ignoring unknown field");
                    continue;
                };
                let value = FieldValue::from_json(&spec.path, spec.kind, raw)?;
                answers.push((spec.path.clone(), value));
            }
        }
        steps.push(answers);
    }

    Ok(Answers { steps })
}
