//! These tests shell out to `sh` and are Unix-only.
#![cfg(unix)]

use std::time::Duration;

use ovaware_core::{QuestionnaireRecord, RiskLevel};
use ovaware_scoring::response::normalize;
use ovaware_scoring::{
    MultiplierAdapter, PayloadFormat, ScoringCollaborator, ScoringError, SubprocessScorer,
};

fn sh(script: &str) -> SubprocessScorer {
    SubprocessScorer::new("sh", vec!["-c".to_string(), script.to_string()])
}

#[tokio::test]
async fn reads_json_from_stdout() {
    let scorer = sh(r#"cat > /dev/null; echo '{"riskScore": 12, "riskLevel": "Low", "keyInfluencingFactors": ["Age"], "nextSteps": "Annual check-up"}'"#);
    let raw = scorer.score(&QuestionnaireRecord::default()).await.unwrap();
    let assessment = normalize(raw).unwrap();
    assert_eq!(assessment.level, RiskLevel::Low);
}

#[tokio::test]
async fn child_that_ignores_stdin_still_scores() {
    // Closing stdin up front races the request write into a broken pipe.
    let scorer = sh(
        r#"exec 0<&-; echo '{"riskScore": 30, "riskLevel": "Moderate", "keyInfluencingFactors": [], "nextSteps": "Recheck in a year"}'"#,
    );
    for _ in 0..50 {
        let raw = scorer.score(&QuestionnaireRecord::default()).await.unwrap();
        assert_eq!(normalize(raw).unwrap().level, RiskLevel::Moderate);
    }
}

#[tokio::test]
async fn large_output_before_reading_stdin() {
    // 256 KiB of padding fills the stdout pipe before the child reads stdin.
    let scorer = sh(
        r#"head -c 262144 /dev/zero | tr '\0' ' '; cat > /dev/null; echo '{"riskScore": 5, "riskLevel": "Low", "keyInfluencingFactors": [], "nextSteps": "None"}'"#,
    )
    .with_timeout(Duration::from_secs(10));
    let raw = scorer.score(&QuestionnaireRecord::default()).await.unwrap();
    assert_eq!(normalize(raw).unwrap().level, RiskLevel::Low);
}

#[tokio::test]
async fn receives_request_on_stdin() {
    // Echo the request back; the flat payload carries `"smoke":"no"`.
    let scorer = sh("cat").with_payload(PayloadFormat::FlatYesNo);
    let raw = scorer.score(&QuestionnaireRecord::default()).await.unwrap();
    assert_eq!(raw["smoke"], "no");
    assert_eq!(raw["weight"], 120.0);
}

#[tokio::test]
async fn non_zero_exit_is_a_process_error() {
    let scorer = sh("cat > /dev/null; exit 3");
    let err = scorer
        .score(&QuestionnaireRecord::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ScoringError::Process(_)), "{err}");
}

#[tokio::test]
async fn stderr_output_is_a_process_error() {
    let scorer = sh(r#"cat > /dev/null; echo 'model missing' >&2; echo '{}'"#);
    let err = scorer
        .score(&QuestionnaireRecord::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("model missing"));
}

#[tokio::test]
async fn garbage_stdout_is_malformed() {
    let scorer = sh("cat > /dev/null; echo 'risk is high'");
    let err = scorer
        .score(&QuestionnaireRecord::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ScoringError::Malformed(_)), "{err}");
}

#[tokio::test]
async fn missing_program_is_a_process_error() {
    let scorer = SubprocessScorer::new("/nonexistent/ovaware-model", Vec::new());
    let err = scorer
        .score(&QuestionnaireRecord::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ScoringError::Process(_)), "{err}");
}

#[tokio::test]
async fn slow_process_times_out() {
    let scorer = sh("sleep 5").with_timeout(Duration::from_millis(100));
    let err = scorer
        .score(&QuestionnaireRecord::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ScoringError::Timeout(_)), "{err}");
}

#[tokio::test]
async fn multiplier_adapter_expands_legacy_answers() {
    let inner = sh(r#"cat > /dev/null; echo '{"risk": 2.4}'"#);
    let adapter = MultiplierAdapter::new(Box::new(inner));
    let raw = adapter.score(&QuestionnaireRecord::default()).await.unwrap();
    let assessment = normalize(raw).unwrap();
    assert_eq!(assessment.level, RiskLevel::High);
    assert!((assessment.score - 240.0).abs() < 1e-9);
}
