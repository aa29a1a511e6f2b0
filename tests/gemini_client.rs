mod common;

use httpmock::prelude::*;
use marketwise::domain::model::{GenerativeModel, ModelError};
use serde_json::json;

#[tokio::test]
async fn test_generate_sends_prompt_and_config() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(common::GENERATE_PATH)
                .header("x-goog-api-key", common::TEST_API_KEY)
                .json_body_partial(
                    json!({
                        "contents": [{ "role": "user", "parts": [{ "text": "Hello model" }] }],
                        "generationConfig": {
                            "topK": 64,
                            "maxOutputTokens": 8192,
                            "responseMimeType": "application/json"
                        }
                    })
                    .to_string(),
                );
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "candidates": [{
                        "content": { "parts": [{ "text": "{\"a\":" }, { "text": " 1}" }] }
                    }]
                }));
        })
        .await;

    let model = common::test_model(&server.base_url());
    let reply = model.generate("Hello model").await.unwrap();

    mock.assert_async().await;
    assert_eq!(reply, "{\"a\": 1}");
    assert_eq!(model.model_name(), common::TEST_MODEL);
}

#[tokio::test]
async fn test_generate_error_status_keeps_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(common::GENERATE_PATH);
            then.status(403).body("API key not valid");
        })
        .await;

    let model = common::test_model(&server.base_url());
    let err = model.generate("Hello").await.unwrap_err();

    assert_eq!(
        err,
        ModelError::Status {
            status: 403,
            body: "API key not valid".to_string()
        }
    );
}

#[tokio::test]
async fn test_generate_without_candidates_is_empty() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(common::GENERATE_PATH);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "promptFeedback": { "blockReason": "SAFETY" } }));
        })
        .await;

    let model = common::test_model(&server.base_url());

    assert_eq!(model.generate("Hello").await.unwrap_err(), ModelError::Empty);
}

#[tokio::test]
async fn test_generate_unreadable_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(common::GENERATE_PATH);
            then.status(200).body("<html>gateway</html>");
        })
        .await;

    let model = common::test_model(&server.base_url());

    assert!(matches!(
        model.generate("Hello").await,
        Err(ModelError::Decode(_))
    ));
}

#[tokio::test]
async fn test_generate_unreachable_host() {
    // Port 9 (discard) is closed on test machines
    let model = common::test_model("http://127.0.0.1:9");

    assert!(matches!(
        model.generate("Hello").await,
        Err(ModelError::Transport(_))
    ));
}
