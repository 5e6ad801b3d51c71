//! Model classifier tests against a mock chat completions endpoint

use checklink::classifier::{ClassificationError, ContentClassifier, HeuristicClassifier};
use checklink::config::ClassifierConfig;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn model_config(server: &MockServer) -> ClassifierConfig {
    ClassifierConfig {
        model_key: Some("sk-test".to_string()),
        endpoint: format!("{}/v1/chat/completions", server.uri()),
        ..ClassifierConfig::default()
    }
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content } }
        ]
    })
}

#[tokio::test]
async fn test_model_verdict_is_used() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            r#"{"relevance_score": 9, "is_suspicious": false, "reasons": [], "summary": "Visa guidance"}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let classifier = ContentClassifier::from_config(&model_config(&server)).unwrap();
    assert!(classifier.has_model());

    // The heuristic would call this suspicious; the model says otherwise.
    let verdict = classifier.classify("Act now to renew your visa", "Embassy").await;

    assert_eq!(verdict.relevance_score, 9);
    assert!(!verdict.is_suspicious);
    assert_eq!(verdict.summary, "Visa guidance");
}

#[tokio::test]
async fn test_fenced_model_reply_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            "```json\n{\"relevance_score\": 2, \"is_suspicious\": true, \"reasons\": [\"Fake prize\"], \"summary\": \"Prize scam\"}\n```",
        )))
        .mount(&server)
        .await;

    let classifier = ContentClassifier::from_config(&model_config(&server)).unwrap();
    let verdict = classifier
        .classify_with_model("You have been selected", "Embassy")
        .await
        .unwrap();

    assert!(verdict.is_suspicious);
    assert_eq!(verdict.reasons, vec!["Fake prize"]);
}

#[tokio::test]
async fn test_malformed_reply_falls_back_to_heuristic() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Looks fine to me.")))
        .mount(&server)
        .await;

    let classifier = ContentClassifier::from_config(&model_config(&server)).unwrap();
    let text = "Free money for everyone";

    assert!(matches!(
        classifier.classify_with_model(text, "Embassy").await,
        Err(ClassificationError::Malformed(_))
    ));
    assert_eq!(
        classifier.classify(text, "Embassy").await,
        HeuristicClassifier::default().classify(text, "Embassy")
    );
}

#[tokio::test]
async fn test_error_status_falls_back_to_heuristic() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let classifier = ContentClassifier::from_config(&model_config(&server)).unwrap();

    assert!(matches!(
        classifier.classify_with_model("text", "goal").await,
        Err(ClassificationError::Status(429))
    ));
    let verdict = classifier.classify("online casino", "Embassy").await;
    assert!(verdict.is_suspicious);
}

#[tokio::test]
async fn test_empty_reply_falls_back_to_heuristic() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let classifier = ContentClassifier::from_config(&model_config(&server)).unwrap();

    assert!(matches!(
        classifier.classify_with_model("text", "goal").await,
        Err(ClassificationError::EmptyResponse)
    ));
}

#[tokio::test]
async fn test_topic_keywords_reach_the_fallback() {
    let config = ClassifierConfig {
        topic_keywords: vec!["consulate".to_string()],
        ..ClassifierConfig::default()
    };
    let classifier = ContentClassifier::from_config(&config).unwrap();

    let verdict = classifier.classify("Chocolate cake recipe", "Embassy").await;

    assert!(verdict.is_irrelevant);
    assert_eq!(verdict.reasons, vec!["Content not related to site purpose"]);
}
