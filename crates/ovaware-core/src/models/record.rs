use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::catalog::{self, FieldKind};
use crate::error::CoreError;

/// The complete set of answers forming one assessment submission.
///
/// Grouped by form section; field names match the ids in
/// [`catalog::sections`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionnaireRecord {
    pub demographics: Demographics,
    pub reproductive_history: ReproductiveHistory,
    pub physical_characteristics: PhysicalCharacteristics,
    pub family_history: FamilyHistory,
    pub health_conditions: HealthConditions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Demographics {
    pub race: String,
    pub age: i64,
    pub higher_education: String,
}

impl Default for Demographics {
    fn default() -> Self {
        Self {
            race: "White".to_string(),
            age: 0,
            higher_education: "high_school".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReproductiveHistory {
    pub previous_pregnancies: i64,
    pub years_since_pregnancy: f64,
    pub age_at_first_pregnancy: i64,
    pub oral_contraceptives: bool,
    pub contraceptive_type: String,
    pub contraceptive_years: f64,
    pub menopausal: bool,
    pub hormone_therapy: bool,
    pub period_onset_age: i64,
}

impl Default for ReproductiveHistory {
    fn default() -> Self {
        Self {
            previous_pregnancies: 0,
            years_since_pregnancy: 0.0,
            age_at_first_pregnancy: 0,
            oral_contraceptives: false,
            contraceptive_type: "None".to_string(),
            contraceptive_years: 0.0,
            menopausal: false,
            hormone_therapy: false,
            period_onset_age: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PhysicalCharacteristics {
    pub weight_lb: f64,
    pub height_in: f64,
}

impl Default for PhysicalCharacteristics {
    fn default() -> Self {
        Self {
            weight_lb: 120.0,
            height_in: 64.0,
        }
    }
}

impl PhysicalCharacteristics {
    /// Body-mass index from imperial units. `None` when height is not positive.
    pub fn bmi(&self) -> Option<f64> {
        if self.height_in <= 0.0 {
            return None;
        }
        Some(703.0 * self.weight_lb / (self.height_in * self.height_in))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FamilyHistory {
    pub immediate_ovarian: i64,
    pub immediate_breast: i64,
    pub distant_ovarian: bool,
    pub distant_breast: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HealthConditions {
    pub endometriosis: bool,
    pub irregular_periods: bool,
    pub frequent_bloating: bool,
    pub smoker: bool,
}

/// A single field value, as entered through the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum FieldValue {
    Boolean(bool),
    Integer(i64),
    Decimal(f64),
    Choice(String),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Boolean(_) => FieldKind::Boolean,
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Decimal(_) => FieldKind::Decimal,
            FieldValue::Choice(_) => FieldKind::Choice,
        }
    }

    /// Numeric view used by range checks.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(v) => Some(*v as f64),
            FieldValue::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    /// Convert a raw JSON value into a field value of the given kind.
    ///
    /// Integers are accepted for decimal fields. Integer fields take whole
    /// numbers, including a float such as `45.0`; fractions are rejected.
    pub fn from_json(path: &str, kind: FieldKind, value: &Value) -> Result<Self, CoreError> {
        let converted = match (kind, value) {
            (FieldKind::Boolean, Value::Bool(b)) => Some(FieldValue::Boolean(*b)),
            (FieldKind::Integer, Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().and_then(whole_number))
                .map(FieldValue::Integer),
            (FieldKind::Decimal, Value::Number(n)) => n.as_f64().map(FieldValue::Decimal),
            (FieldKind::Choice, Value::String(s)) => Some(FieldValue::Choice(s.clone())),
            _ => None,
        };
        converted.ok_or_else(|| CoreError::TypeMismatch {
            path: path.to_string(),
            expected: kind,
            found: value.to_string(),
        })
    }

    fn to_json(&self) -> Value {
        match self {
            FieldValue::Boolean(b) => Value::Bool(*b),
            FieldValue::Integer(i) => Value::from(*i),
            FieldValue::Decimal(d) => Value::from(*d),
            FieldValue::Choice(s) => Value::String(s.clone()),
        }
    }
}

fn whole_number(value: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.fract() == 0.0 && in_range).then_some(value as i64)
}

fn pointer(path: &str) -> String {
    format!("/{}", path.replace('.', "/"))
}

impl QuestionnaireRecord {
    /// Read one field by dotted path, e.g. `demographics.age`.
    pub fn get(&self, path: &str) -> Result<FieldValue, CoreError> {
        let spec =
            catalog::field_spec(path).ok_or_else(|| CoreError::UnknownField(path.to_string()))?;
        let json = serde_json::to_value(self)?;
        let raw = json
            .pointer(&pointer(path))
            .ok_or_else(|| CoreError::UnknownField(path.to_string()))?;
        FieldValue::from_json(path, spec.kind, raw)
    }

    /// Overwrite one field by dotted path. The value kind must match the
    /// catalog; an integer is widened when the field is a decimal.
    pub fn set(&mut self, path: &str, value: FieldValue) -> Result<(), CoreError> {
        let spec =
            catalog::field_spec(path).ok_or_else(|| CoreError::UnknownField(path.to_string()))?;

        let value = match (spec.kind, value) {
            (FieldKind::Decimal, FieldValue::Integer(i)) => FieldValue::Decimal(i as f64),
            (kind, v) if kind == v.kind() => v,
            (kind, v) => {
                return Err(CoreError::TypeMismatch {
                    path: path.to_string(),
                    expected: kind,
                    found: v.to_json().to_string(),
                });
            }
        };

        let mut json = serde_json::to_value(&*self)?;
        let slot = json
            .pointer_mut(&pointer(path))
            .ok_or_else(|| CoreError::UnknownField(path.to_string()))?;
        *slot = value.to_json();
        *self = serde_json::from_value(json)?;
        Ok(())
    }

    /// Body-mass index derived from the physical characteristics section.
    pub fn bmi(&self) -> Option<f64> {
        self.physical_characteristics.bmi()
    }
}
