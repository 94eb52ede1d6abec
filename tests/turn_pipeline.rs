//! Engine-level tests against a mocked Gemini endpoint.

use akin::config::Config;
use akin::error::{EngineError, LlmError};
use akin::game::{Answer, Decision, GameState, QaPair, TurnEngine};
use akin::llm::GeminiProvider;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/models/gemini-2.0-flash:generateContent";

fn test_config() -> Config {
    let mut config = Config::default();
    config.api_key = Some("test-key".to_string());
    config
}

fn engine_for(server: &MockServer) -> TurnEngine {
    let config = test_config();
    let provider = Arc::new(GeminiProvider::with_base_url(&config, &server.uri()));
    TurnEngine::new(provider, config.policy)
}

fn answered_state(count: u32) -> GameState {
    GameState {
        current_question: format!("Question {count}?"),
        question_count: count,
        user_responses: (1..=count)
            .map(|i| QaPair {
                question: format!("Question {i}?"),
                answer: if i % 2 == 0 { Answer::No } else { Answer::Yes },
            })
            .collect(),
        ..GameState::default()
    }
}

fn gemini_reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{"content": {"parts": [{"text": text}]}}]
    }))
}

#[tokio::test]
async fn active_turn_round_trips_through_the_service() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": {
                "temperature": 0.7,
                "topK": 40,
                "topP": 0.95,
                "maxOutputTokens": 1024
            }
        })))
        .respond_with(gemini_reply(
            "```json\n{\"type\": \"question\", \"question\": \"Is it animated?\"}\n```",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = engine_for(&server)
        .take_turn(answered_state(5))
        .await
        .unwrap();

    assert_eq!(
        outcome.decision,
        Decision::Question {
            text: "Is it animated?".into()
        }
    );
    assert_eq!(outcome.state.question_count, 6);
    assert_eq!(outcome.state.current_question, "Is it animated?");
    server.verify().await;
}

#[tokio::test]
async fn prompt_carries_the_full_transcript() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(gemini_reply(
            r#"{"type": "question", "question": "Is it recent?"}"#,
        ))
        .mount(&server)
        .await;

    engine_for(&server)
        .take_turn(answered_state(3))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = requests[0].body_json().unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("Q: \"Question 1?\""));
    assert!(prompt.contains("A: \"yes\""));
    assert!(prompt.contains("Questions asked: 3."));
    assert!(!prompt.contains("\"type\": \"guess\""));
}

#[tokio::test]
async fn eligible_confident_guess_is_accepted() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(gemini_reply(
            r#"{"type": "guess", "character": "Hayao Miyazaki", "confidence": 0.99,
                "question": "Am I right? Is it Hayao Miyazaki?"}"#,
        ))
        .mount(&server)
        .await;

    let outcome = engine_for(&server)
        .take_turn(answered_state(20))
        .await
        .unwrap();

    assert!(matches!(outcome.decision, Decision::Guess { .. }));
    assert_eq!(
        outcome.state.guessed_character.as_deref(),
        Some("Hayao Miyazaki")
    );
    assert_eq!(outcome.state.confidence, Some(0.99));
}

#[tokio::test]
async fn under_confident_guess_is_downgraded_to_its_confirmation_question() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(gemini_reply(
            r#"{"type": "guess", "character": "Hayao Miyazaki", "confidence": 0.80,
                "question": "Am I right? Is it Hayao Miyazaki?"}"#,
        ))
        .mount(&server)
        .await;

    let outcome = engine_for(&server)
        .take_turn(answered_state(20))
        .await
        .unwrap();

    assert_eq!(
        outcome.decision,
        Decision::Question {
            text: "Am I right? Is it Hayao Miyazaki?".into()
        }
    );
    assert!(outcome.state.guessed_character.is_none());
    assert!(outcome.state.confidence.is_none());
}

#[tokio::test]
async fn confident_guess_before_the_minimum_is_still_downgraded() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(gemini_reply(
            r#"{"type": "guess", "character": "Hayao Miyazaki", "confidence": 0.99,
                "question": "Am I right? Is it Hayao Miyazaki?"}"#,
        ))
        .mount(&server)
        .await;

    let outcome = engine_for(&server)
        .take_turn(answered_state(19))
        .await
        .unwrap();

    assert!(matches!(outcome.decision, Decision::Question { .. }));
    assert!(outcome.state.guessed_character.is_none());
}

#[tokio::test]
async fn upstream_error_surfaces_with_status_context() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("model overloaded"))
        .mount(&server)
        .await;

    let err = engine_for(&server)
        .take_turn(answered_state(5))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        EngineError::Llm(LlmError::Upstream { status: 503, .. })
    ));
    assert_eq!(err.kind(), "upstream");
}

#[tokio::test]
async fn reply_without_text_is_an_empty_reply_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let err = engine_for(&server)
        .take_turn(answered_state(5))
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::Llm(LlmError::EmptyReply)));
    assert_eq!(err.kind(), "empty_reply");
}

#[tokio::test]
async fn unparseable_reply_is_a_format_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(gemini_reply("I cannot answer in the requested format."))
        .mount(&server)
        .await;

    let err = engine_for(&server)
        .take_turn(answered_state(5))
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::Format(_)));
    assert_eq!(err.kind(), "format");
}

#[tokio::test]
async fn retry_after_upstream_failure_counts_the_turn_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("transient"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(gemini_reply(
            r#"{"type": "question", "question": "Is it animated?"}"#,
        ))
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    let state = answered_state(5);

    let first = engine.take_turn(state.clone()).await;
    assert!(first.is_err());

    // Same input state resubmitted; the failed attempt left no trace.
    let outcome = engine.take_turn(state).await.unwrap();
    assert_eq!(outcome.state.question_count, 6);
}

#[tokio::test]
async fn missing_credential_fails_before_any_http_call() {
    if std::env::var("GEMINI_API_KEY").is_ok() || std::env::var("GOOGLE_API_KEY").is_ok() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(gemini_reply("unused"))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.api_key = None;
    let provider = Arc::new(GeminiProvider::with_base_url(&config, &server.uri()));
    let engine = TurnEngine::new(provider, config.policy);

    let err = engine.take_turn(answered_state(5)).await.unwrap_err();
    assert!(matches!(err, EngineError::Llm(LlmError::MissingApiKey)));
    assert_eq!(err.kind(), "config");
    server.verify().await;
}
