use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use ovaware_core::{QuestionnaireRecord, RiskLevel};
use ovaware_scoring::response::normalize;
use ovaware_scoring::{HttpScorer, PayloadFormat, ScorerConfig, ScoringCollaborator, ScoringError};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Serve `app` on an ephemeral port and return its base URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn calculate(Json(body): Json<Value>) -> Json<Value> {
    let smoker = body["health_conditions"]["smoker"].as_bool().unwrap_or(false);
    Json(json!({
        "riskScore": if smoker { 70 } else { 20 },
        "riskLevel": if smoker { "High" } else { "Low" },
        "keyInfluencingFactors": ["Lifestyle"],
        "nextSteps": "Talk to your doctor"
    }))
}

fn scorer(url: String) -> HttpScorer {
    HttpScorer::new(url, PayloadFormat::Nested, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn posts_nested_record_and_reads_response() {
    let base = serve(Router::new().route("/calculate", post(calculate))).await;

    let mut record = QuestionnaireRecord::default();
    record.health_conditions.smoker = true;

    let raw = scorer(format!("{base}/calculate")).score(&record).await.unwrap();
    let assessment = normalize(raw).unwrap();
    assert_eq!(assessment.level, RiskLevel::High);
    assert_eq!(assessment.score, 70.0);
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let app = Router::new().route(
        "/calculate",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Risk calculation failed") }),
    );
    let base = serve(app).await;

    let err = scorer(format!("{base}/calculate"))
        .score(&QuestionnaireRecord::default())
        .await
        .unwrap_err();
    match err {
        ScoringError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "Risk calculation failed");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn html_body_is_malformed() {
    let app = Router::new().route("/calculate", post(|| async { "<html>oops</html>" }));
    let base = serve(app).await;

    let err = scorer(format!("{base}/calculate"))
        .score(&QuestionnaireRecord::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ScoringError::Malformed(_)), "{err}");
}

#[tokio::test]
async fn unreachable_endpoint() {
    // Bind then drop to get a port nobody is listening on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = scorer(format!("http://{addr}/calculate"))
        .score(&QuestionnaireRecord::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ScoringError::Unreachable(_)), "{err}");
}

#[tokio::test]
async fn stalled_body_times_out() {
    // Headers promise a body that never finishes arriving.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = vec![0u8; 4096];
        let _ = socket.read(&mut request).await;
        socket
            .write_all(b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 100\r\n\r\n{")
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    let scorer = HttpScorer::new(
        format!("http://{addr}/calculate"),
        PayloadFormat::Nested,
        Duration::from_millis(300),
    )
    .unwrap();
    let err = scorer
        .score(&QuestionnaireRecord::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ScoringError::Timeout(_)), "{err}");
}

#[tokio::test]
async fn config_builds_legacy_multiplier_endpoint() {
    let app = Router::new().route(
        "/calculate",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["endo"], "no");
            Json(json!({ "risk": 0.8 }))
        }),
    );
    let base = serve(app).await;

    let config: ScorerConfig = serde_json::from_value(json!({
        "type": "http",
        "url": format!("{base}/calculate"),
        "payload": "flat_yes_no",
        "legacy_multiplier": true
    }))
    .unwrap();

    let collaborator = config.build().unwrap();
    let raw = collaborator
        .score(&QuestionnaireRecord::default())
        .await
        .unwrap();
    let assessment = normalize(raw).unwrap();
    assert_eq!(assessment.level, RiskLevel::Low);
    assert!((assessment.score - 80.0).abs() < 1e-9);
}

#[test]
fn config_rejects_bad_urls() {
    let config = ScorerConfig::Http {
        url: "localhost:8000".to_string(),
        payload: PayloadFormat::Nested,
        legacy_multiplier: false,
        timeout_secs: 5,
    };
    assert!(matches!(config.build(), Err(ScoringError::Config(_))));
}
