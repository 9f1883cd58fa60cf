//! Integration tests for `HttpClassifier` and model loading using wiremock.

use serde_json::json;
use tubesense_core::SentimentLabel;
use tubesense_sentiment::{
    http_candidates, ClassifierError, HttpClassifier, ModelOutput, SentimentAnalyzer,
    TextClassifier,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PRIMARY: &str = "org/primary-sentiment";
const FALLBACK: &str = "org/fallback-stars";

#[tokio::test]
async fn classify_parses_nested_scores() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/models/{PRIMARY}")))
        .and(body_json(json!({"inputs": "videonya bagus sekali"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[
            {"label": "positive", "score": 0.93},
            {"label": "neutral", "score": 0.05},
            {"label": "negative", "score": 0.02}
        ]])))
        .expect(1)
        .mount(&server)
        .await;

    let classifier = HttpClassifier::new(&server.uri(), PRIMARY, None, 5).expect("build");
    let output = classifier
        .classify("videonya bagus sekali")
        .await
        .expect("classify");

    assert!(matches!(output, ModelOutput::RankedLabels(ref l) if l.len() == 3));
    assert_eq!(output.top().map(|l| l.label.as_str()), Some("positive"));
}

#[tokio::test]
async fn classify_sends_bearer_token_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/models/{FALLBACK}")))
        .and(header("authorization", "Bearer hf-secret"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"label": "1 star", "score": 0.8}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let classifier =
        HttpClassifier::new(&server.uri(), FALLBACK, Some("hf-secret"), 5).expect("build");
    let output = classifier.classify("parah").await.expect("classify");

    assert!(matches!(output, ModelOutput::SingleLabel(ref l) if l.label == "1 star"));
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/models/{PRIMARY}")))
        .respond_with(ResponseTemplate::new(503).set_body_string("model is currently loading"))
        .mount(&server)
        .await;

    let classifier = HttpClassifier::new(&server.uri(), PRIMARY, None, 5).expect("build");
    let err = classifier.classify("halo").await.expect_err("should fail");

    match err {
        ClassifierError::Status { status, message } => {
            assert_eq!(status, 503);
            assert!(message.contains("loading"));
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn unexpected_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/models/{PRIMARY}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "nope"})))
        .mount(&server)
        .await;

    let classifier = HttpClassifier::new(&server.uri(), PRIMARY, None, 5).expect("build");
    let err = classifier.classify("halo").await.expect_err("should fail");
    assert!(matches!(err, ClassifierError::Deserialize(_)));
}

#[tokio::test]
async fn load_falls_back_when_primary_model_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/models/{PRIMARY}")))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/models/{FALLBACK}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"label": "5 stars", "score": 0.7}])),
        )
        .mount(&server)
        .await;

    let models = vec![PRIMARY.to_string(), FALLBACK.to_string()];
    let analyzer = SentimentAnalyzer::load(http_candidates(&server.uri(), &models, None, 5)).await;

    assert!(analyzer.is_loaded());
    assert_eq!(analyzer.model_id(), Some(FALLBACK));

    let result = analyzer.analyze("keren").await;
    assert_eq!(result.label, SentimentLabel::Positive);
    assert!((result.score - 0.7).abs() < 1e-9);
}

#[tokio::test]
async fn load_degrades_when_no_model_answers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let models = vec![PRIMARY.to_string(), FALLBACK.to_string()];
    let analyzer = SentimentAnalyzer::load(http_candidates(&server.uri(), &models, None, 5)).await;

    assert!(!analyzer.is_loaded());
    let result = analyzer.analyze("keren").await;
    assert_eq!(result.label, SentimentLabel::Neutral);
    assert_eq!(result.error.as_deref(), Some("Model not loaded"));
}
