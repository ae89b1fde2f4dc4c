//! Request body encodings.

use ovaware_core::QuestionnaireRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ScoringError;

/// How the record is laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadFormat {
    /// Section-grouped record, exactly as [`QuestionnaireRecord`] serializes.
    #[default]
    Nested,
    /// Flat keys with booleans sent as `"yes"` / `"no"`, the layout the
    /// Python risk service reads.
    FlatYesNo,
}

/// Record path → flat key understood by the Python risk service.
const FLAT_KEYS: &[(&str, &str)] = &[
    ("demographics.race", "race"),
    ("demographics.age", "age"),
    ("demographics.higher_education", "higher_ed"),
    ("reproductive_history.previous_pregnancies", "prev_preg"),
    ("reproductive_history.years_since_pregnancy", "time_since_preg"),
    ("reproductive_history.age_at_first_pregnancy", "age_at_first_preg"),
    ("reproductive_history.oral_contraceptives", "oral_contra"),
    ("reproductive_history.contraceptive_type", "type_contra"),
    ("reproductive_history.contraceptive_years", "len_contra"),
    ("reproductive_history.menopausal", "menopausal"),
    ("reproductive_history.hormone_therapy", "HRT"),
    ("reproductive_history.period_onset_age", "period_onset"),
    ("physical_characteristics.weight_lb", "weight"),
    ("physical_characteristics.height_in", "height"),
    ("family_history.immediate_ovarian", "immed_ovarian_family"),
    ("family_history.immediate_breast", "immed_breast_family"),
    ("family_history.distant_ovarian", "distant_ovarian_family"),
    ("family_history.distant_breast", "distant_breast_family"),
    ("health_conditions.endometriosis", "endo"),
    ("health_conditions.irregular_periods", "irreg_period"),
    ("health_conditions.frequent_bloating", "freq_bloat"),
    ("health_conditions.smoker", "smoke"),
];

impl PayloadFormat {
    pub fn encode(self, record: &QuestionnaireRecord) -> Result<Value, ScoringError> {
        let nested = serde_json::to_value(record).map_err(|e| ScoringError::Encode(e.to_string()))?;
        match self {
            PayloadFormat::Nested => Ok(nested),
            PayloadFormat::FlatYesNo => {
                let mut flat = Map::new();
                for (path, key) in FLAT_KEYS {
                    let pointer = format!("/{}", path.replace('.', "/"));
                    let value = nested
                        .pointer(&pointer)
                        .cloned()
                        .ok_or_else(|| ScoringError::Encode(format!("missing field {path}")))?;
                    let value = match value {
                        Value::Bool(true) => Value::String("yes".to_string()),
                        Value::Bool(false) => Value::String("no".to_string()),
                        other => other,
                    };
                    flat.insert((*key).to_string(), value);
                }
                Ok(Value::Object(flat))
            }
        }
    }
}
