use ovaware_core::catalog::{self, Bounds};
use ovaware_core::validation::{is_complete, validate_record, validate_section};
use ovaware_core::{CoreError, FieldValue, QuestionnaireRecord};

#[test]
fn defaults_are_complete() {
    assert!(is_complete(&QuestionnaireRecord::default()));
}

#[test]
fn age_boundaries() {
    let mut record = QuestionnaireRecord::default();

    for ok in [0, 120] {
        record.demographics.age = ok;
        assert!(validate_record(&record).is_empty(), "age {ok} should pass");
    }

    for bad in [-1, 121] {
        record.demographics.age = bad;
        let errors = validate_record(&record);
        let messages = errors.get("demographics.age").expect("age error");
        assert_eq!(messages, &vec!["Age must be between 0 and 120".to_string()]);
    }
}

#[test]
fn weight_must_be_strictly_positive() {
    let mut record = QuestionnaireRecord::default();
    record.physical_characteristics.weight_lb = 0.0;
    let errors = validate_record(&record);
    assert_eq!(
        errors["physical_characteristics.weight_lb"],
        vec!["Weight (lb) must be greater than 0".to_string()]
    );
}

#[test]
fn choice_outside_allowed_set_fails() {
    let mut record = QuestionnaireRecord::default();
    record.reproductive_history.contraceptive_type = "Patch".to_string();
    record.demographics.race = String::new();

    let errors = validate_record(&record);
    assert!(errors["reproductive_history.contraceptive_type"][0].contains("must be one of"));
    assert_eq!(errors["demographics.race"], vec!["Race / ethnicity is required".to_string()]);
}

#[test]
fn section_validation_ignores_other_sections() {
    let mut record = QuestionnaireRecord::default();
    record.family_history.immediate_breast = -3;

    let demographics = &catalog::sections()[0];
    assert!(validate_section(&record, demographics).is_empty());

    let family = &catalog::sections()[3];
    let errors = validate_section(&record, family);
    assert_eq!(errors.len(), 1);
    assert!(errors.contains_key("family_history.immediate_breast"));
}

#[test]
fn bounds_describe_and_contain() {
    assert!(Bounds::NON_NEGATIVE.contains(0.0));
    assert!(!Bounds::POSITIVE.contains(0.0));
    assert!(!Bounds::between(0.0, 1.0).contains(f64::NAN));
    assert_eq!(Bounds::POSITIVE.describe(), "greater than 0");
    assert_eq!(Bounds::NON_NEGATIVE.describe(), "at least 0");
}

#[test]
fn get_and_set_by_path() {
    let mut record = QuestionnaireRecord::default();

    record
        .set("demographics.age", FieldValue::Integer(45))
        .unwrap();
    record
        .set("physical_characteristics.height_in", FieldValue::Integer(66))
        .unwrap();
    record
        .set("health_conditions.smoker", FieldValue::Boolean(true))
        .unwrap();

    assert_eq!(record.demographics.age, 45);
    assert_eq!(record.physical_characteristics.height_in, 66.0);
    assert!(record.health_conditions.smoker);
    assert_eq!(
        record.get("demographics.race").unwrap(),
        FieldValue::Choice("White".to_string())
    );
}

#[test]
fn set_rejects_unknown_paths_and_wrong_kinds() {
    let mut record = QuestionnaireRecord::default();

    assert!(matches!(
        record.set("demographics.shoe_size", FieldValue::Integer(8)),
        Err(CoreError::UnknownField(_))
    ));
    assert!(matches!(
        record.set("demographics.age", FieldValue::Boolean(true)),
        Err(CoreError::TypeMismatch { .. })
    ));
    assert_eq!(record, QuestionnaireRecord::default());
}

#[test]
fn fractional_number_is_not_an_integer() {
    let spec = catalog::field_spec("demographics.age").unwrap();
    let err = FieldValue::from_json(&spec.path, spec.kind, &serde_json::json!(44.5));
    assert!(matches!(err, Err(CoreError::TypeMismatch { .. })));
}

#[test]
fn whole_float_is_an_integer() {
    let spec = catalog::field_spec("demographics.age").unwrap();
    let value = FieldValue::from_json(&spec.path, spec.kind, &serde_json::json!(45.0)).unwrap();
    assert_eq!(value, FieldValue::Integer(45));

    let huge = FieldValue::from_json(&spec.path, spec.kind, &serde_json::json!(1e300));
    assert!(matches!(huge, Err(CoreError::TypeMismatch { .. })));
}

#[test]
fn bmi_from_imperial_units() {
    let record = QuestionnaireRecord::default();
    let bmi = record.bmi().unwrap();
    assert!((bmi - 20.595703125).abs() < 1e-9);
}

#[test]
fn record_serializes_nested_by_section() {
    let json = serde_json::to_value(QuestionnaireRecord::default()).unwrap();
    assert_eq!(json["demographics"]["age"], 0);
    assert_eq!(json["reproductive_history"]["contraceptive_type"], "None");
    assert_eq!(json["physical_characteristics"]["weight_lb"], 120.0);
}
