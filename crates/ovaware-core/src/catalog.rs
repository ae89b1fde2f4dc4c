//! The questionnaire field catalog.
//!
//! Each step of the assessment form shows exactly one [`Section`]. The
//! catalog is the single source of truth for which fields belong to which
//! step, what kind of value each field holds, and which constraint it must
//! satisfy before the form may advance.

use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Semantic type of a questionnaire field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FieldKind {
    /// Whole number (counts, ages).
    Integer,
    /// Fractional number (weight, durations).
    Decimal,
    /// Yes/no answer.
    Boolean,
    /// One value out of a fixed list of strings.
    Choice,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Integer => "an integer",
            FieldKind::Decimal => "a decimal",
            FieldKind::Boolean => "a boolean",
            FieldKind::Choice => "a choice",
        };
        f.write_str(name)
    }
}

/// Numeric bounds for a field. `min` is inclusive unless `exclusive_min` is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
    #[serde(default)]
    pub exclusive_min: bool,
}

impl Bounds {
    pub const NON_NEGATIVE: Bounds = Bounds {
        min: Some(0.0),
        max: None,
        exclusive_min: false,
    };

    pub const POSITIVE: Bounds = Bounds {
        min: Some(0.0),
        max: None,
        exclusive_min: true,
    };

    pub const fn between(min: f64, max: f64) -> Bounds {
        Bounds {
            min: Some(min),
            max: Some(max),
            exclusive_min: false,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        if let Some(min) = self.min {
            if self.exclusive_min && value <= min {
                return false;
            }
            if value < min {
                return false;
            }
        }
        match self.max {
            Some(max) => value <= max,
            None => true,
        }
    }

    /// Human-readable description, e.g. "between 0 and 120".
    pub fn describe(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("between {min} and {max}"),
            (Some(min), None) if self.exclusive_min => format!("greater than {min}"),
            (Some(min), None) => format!("at least {min}"),
            (None, Some(max)) => format!("at most {max}"),
            (None, None) => "a number".to_string(),
        }
    }
}

/// Constraint a field value must satisfy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum Constraint {
    Range(Bounds),
    OneOf { allowed: Vec<String> },
    /// Any value of the right kind is accepted.
    Unconstrained,
}

/// One question in the form.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldSpec {
    /// Field name within its section, e.g. `age`.
    pub id: String,
    /// Dotted path, e.g. `demographics.age`.
    pub path: String,
    pub label: String,
    pub kind: FieldKind,
    pub constraint: Constraint,
}

/// One step of the form.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub fields: Vec<FieldSpec>,
}

impl Section {
    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.id == id)
    }
}

pub const RACES: &[&str] = &[
    "White",
    "Ashkenazi",
    "Black",
    "Asian",
    "Hispanic",
    "Native Hawaiian/Pacific Islander",
];

pub const EDUCATION_LEVELS: &[&str] = &[
    "less_than_high_school",
    "high_school",
    "some_college",
    "college",
    "graduate",
];

pub const CONTRACEPTIVE_TYPES: &[&str] = &["Pill", "IUD", "Implant", "None"];

fn field(section: &str, id: &str, label: &str, kind: FieldKind, constraint: Constraint) -> FieldSpec {
    FieldSpec {
        id: id.to_string(),
        path: format!("{section}.{id}"),
        label: label.to_string(),
        kind,
        constraint,
    }
}

fn one_of(values: &[&str]) -> Constraint {
    Constraint::OneOf {
        allowed: values.iter().map(|v| v.to_string()).collect(),
    }
}

static SECTIONS: LazyLock<Vec<Section>> = LazyLock::new(|| {
    use FieldKind::{Boolean, Choice, Decimal, Integer};

    let non_negative = Constraint::Range(Bounds::NON_NEGATIVE);
    let positive = Constraint::Range(Bounds::POSITIVE);

    let yes_no = |section: &str, id: &str, label: &str| {
        field(section, id, label, Boolean, Constraint::Unconstrained)
    };

    vec![
        Section {
            id: "demographics".to_string(),
            title: "Demographics".to_string(),
            fields: vec![
                field("demographics", "race", "Race / ethnicity", Choice, one_of(RACES)),
                field(
                    "demographics",
                    "age",
                    "Age",
                    Integer,
                    Constraint::Range(Bounds::between(0.0, 120.0)),
                ),
                field(
                    "demographics",
                    "higher_education",
                    "Highest education",
                    Choice,
                    one_of(EDUCATION_LEVELS),
                ),
            ],
        },
        Section {
            id: "reproductive_history".to_string(),
            title: "Reproductive History".to_string(),
            fields: vec![
                field(
                    "reproductive_history",
                    "previous_pregnancies",
                    "Previous pregnancies",
                    Integer,
                    non_negative.clone(),
                ),
                field(
                    "reproductive_history",
                    "years_since_pregnancy",
                    "Years since last pregnancy",
                    Decimal,
                    non_negative.clone(),
                ),
                field(
                    "reproductive_history",
                    "age_at_first_pregnancy",
                    "Age at first pregnancy",
                    Integer,
                    non_negative.clone(),
                ),
                yes_no(
                    "reproductive_history",
                    "oral_contraceptives",
                    "Used oral contraceptives",
                ),
                field(
                    "reproductive_history",
                    "contraceptive_type",
                    "Contraceptive type",
                    Choice,
                    one_of(CONTRACEPTIVE_TYPES),
                ),
                field(
                    "reproductive_history",
                    "contraceptive_years",
                    "Years of contraceptive use",
                    Decimal,
                    non_negative.clone(),
                ),
                yes_no("reproductive_history", "menopausal", "Post-menopausal"),
                yes_no(
                    "reproductive_history",
                    "hormone_therapy",
                    "Hormone replacement therapy",
                ),
                field(
                    "reproductive_history",
                    "period_onset_age",
                    "Age at first period",
                    Integer,
                    non_negative.clone(),
                ),
            ],
        },
        Section {
            id: "physical_characteristics".to_string(),
            title: "Physical Characteristics".to_string(),
            fields: vec![
                field(
                    "physical_characteristics",
                    "weight_lb",
                    "Weight (lb)",
                    Decimal,
                    positive.clone(),
                ),
                field(
                    "physical_characteristics",
                    "height_in",
                    "Height (in)",
                    Decimal,
                    positive,
                ),
            ],
        },
        Section {
            id: "family_history".to_string(),
            title: "Family History".to_string(),
            fields: vec![
                field(
                    "family_history",
                    "immediate_ovarian",
                    "Immediate relatives with ovarian cancer",
                    Integer,
                    non_negative.clone(),
                ),
                field(
                    "family_history",
                    "immediate_breast",
                    "Immediate relatives with breast cancer",
                    Integer,
                    non_negative,
                ),
                yes_no(
                    "family_history",
                    "distant_ovarian",
                    "Distant relatives with ovarian cancer",
                ),
                yes_no(
                    "family_history",
                    "distant_breast",
                    "Distant relatives with breast cancer",
                ),
            ],
        },
        Section {
            id: "health_conditions".to_string(),
            title: "Health Conditions".to_string(),
            fields: vec![
                yes_no("health_conditions", "endometriosis", "Endometriosis"),
                yes_no("health_conditions", "irregular_periods", "Irregular periods"),
                yes_no("health_conditions", "frequent_bloating", "Frequent bloating"),
                yes_no("health_conditions", "smoker", "Smoker"),
            ],
        },
    ]
});

/// All form sections, in step order.
pub fn sections() -> &'static [Section] {
    &SECTIONS
}

/// Number of steps in the form.
pub fn step_count() -> usize {
    SECTIONS.len()
}

/// Look up a field by dotted path (`section.field`).
pub fn field_spec(path: &str) -> Option<&'static FieldSpec> {
    let (section_id, field_id) = path.split_once('.')?;
    SECTIONS
        .iter()
        .find(|s| s.id == section_id)
        .and_then(|s| s.field(field_id))
}

/// Every field of every section, in step order.
pub fn all_fields() -> impl Iterator<Item = &'static FieldSpec> {
    SECTIONS.iter().flat_map(|s| s.fields.iter())
}
