use ovaware_assessment::ValidationScope;
use ovaware_cli::config::{OvawareConfig, describe_scorer, load_config, save_config};
use ovaware_scoring::{PayloadFormat, ScorerConfig};

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(&dir.path().join("config.json")).unwrap();
    assert_eq!(config, OvawareConfig::default());
    assert_eq!(config.scorer, ScorerConfig::Mock);
}

#[test]
fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let config = OvawareConfig {
        config_version: 0,
        scorer: ScorerConfig::Subprocess {
            program: "python3".to_string(),
            args: vec!["score.py".to_string()],
            payload: PayloadFormat::Nested,
            legacy_multiplier: false,
            timeout_secs: 10,
        },
        validation_scope: ValidationScope::WholeRecord,
        history_dir: Some(dir.path().join("history")),
    };
    save_config(&path, &config).unwrap();

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.config_version, 1);
    assert_eq!(loaded.scorer, config.scorer);
    assert_eq!(loaded.validation_scope, ValidationScope::WholeRecord);
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn migrates_unversioned_api_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "api_url": "http://localhost:8000/calculate" }"#).unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(
        config.scorer,
        ScorerConfig::Http {
            url: "http://localhost:8000/calculate".to_string(),
            payload: PayloadFormat::FlatYesNo,
            legacy_multiplier: true,
            timeout_secs: 30,
        }
    );
    assert_eq!(
        describe_scorer(&config.scorer),
        "http: http://localhost:8000/calculate, multiplier"
    );
}

#[test]
fn rejects_newer_versions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "config_version": 99 }"#).unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn scorer_section_uses_tagged_form() {
    let json = serde_json::to_value(OvawareConfig::default()).unwrap();
    assert_eq!(json["scorer"]["type"], "mock");
    assert_eq!(json["validation_scope"], "current_section");
}
