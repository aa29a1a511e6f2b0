mod common;

use axum::http::StatusCode;
use httpmock::prelude::*;
use serde_json::{Value, json};

fn insights_request(clusters: i64) -> Value {
    json!({
        "clusterData": "id,age,spend\n1,34,120.5\n2,51,40.0",
        "dataTreatment": { "normalize": true, "excludeNulls": true, "groupCategories": false },
        "numberOfClusters": clusters
    })
}

#[tokio::test]
async fn test_segmentation_requires_token() {
    let model = MockServer::start_async().await;
    let server = common::make_server(&model.base_url()).await;

    server
        .post("/api/segmentation-insights")
        .json(&insights_request(2))
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_segmentation_insights_success_and_saved() {
    let model = MockServer::start_async().await;
    let mock = model
        .mock_async(|when, then| {
            when.method(POST)
                .path(common::GENERATE_PATH)
                .header("x-goog-api-key", common::TEST_API_KEY)
                .body_contains("identify exactly 2 potential market segments")
                .body_contains("\"responseMimeType\":\"application/json\"");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(common::gemini_reply(common::INSIGHTS_REPLY));
        })
        .await;

    let server = common::make_server(&model.base_url()).await;
    let token = common::register(&server, "ana@example.com").await;

    let response = server
        .post("/api/segmentation-insights")
        .authorization_bearer(&token)
        .json(&insights_request(2))
        .await;

    response.assert_status_ok();
    mock.assert_async().await;

    let body: Value = response.json();
    assert_eq!(body["textualInsights"], "Two clear groups of buyers");
    assert_eq!(body["segments"][0]["name"], "Loyal");
    assert_eq!(body["segments"][1]["avg_purchase_value"], 40.5);

    // Saved in history, newest first
    let list = server
        .get("/api/segmentation-analyses")
        .authorization_bearer(&token)
        .await;
    list.assert_status_ok();
    let analyses: Value = list.json();
    assert_eq!(analyses.as_array().unwrap().len(), 1);
    assert_eq!(analyses[0]["number_of_clusters"], 2);
    assert_eq!(analyses[0]["original_data_snippet"], "id,age,spend...");

    let id = analyses[0]["id"].as_i64().unwrap();
    let detail = server
        .get(&format!("/api/segmentation-analyses/{id}"))
        .authorization_bearer(&token)
        .await;
    detail.assert_status_ok();
    let saved: Value = detail.json();
    assert_eq!(saved["textualInsights"], "Two clear groups of buyers");
    assert_eq!(saved["segments"][0]["name"], "Loyal");
    assert_eq!(saved["segments"][1]["name"], "New");
}

#[tokio::test]
async fn test_segmentation_rejects_zero_clusters_without_calling_model() {
    let model = MockServer::start_async().await;
    let mock = common::mock_generate(&model, common::INSIGHTS_REPLY).await;

    let server = common::make_server(&model.base_url()).await;
    let token = common::register(&server, "ana@example.com").await;

    let response = server
        .post("/api/segmentation-insights")
        .authorization_bearer(&token)
        .json(&insights_request(0))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert!(body["error"]["details"]["number_of_clusters"].is_array());
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_segmentation_invalid_model_json_is_bad_gateway() {
    let model = MockServer::start_async().await;
    common::mock_generate(&model, "Sorry, I can't do that").await;

    let server = common::make_server(&model.base_url()).await;
    let token = common::register(&server, "ana@example.com").await;

    let response = server
        .post("/api/segmentation-insights")
        .authorization_bearer(&token)
        .json(&insights_request(2))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "The AI response is not valid JSON");

    // Nothing is saved for a failed analysis
    let list: Value = server
        .get("/api/segmentation-analyses")
        .authorization_bearer(&token)
        .await
        .json();
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_segmentation_model_error_status() {
    let model = MockServer::start_async().await;
    model
        .mock_async(|when, then| {
            when.method(POST).path(common::GENERATE_PATH);
            then.status(429).body("quota exceeded");
        })
        .await;

    let server = common::make_server(&model.base_url()).await;
    let token = common::register(&server, "ana@example.com").await;

    let response = server
        .post("/api/segmentation-insights")
        .authorization_bearer(&token)
        .json(&insights_request(2))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "upstream_error");
    assert_eq!(body["error"]["message"], "The AI service returned an error");
}

#[tokio::test]
async fn test_analysis_not_found() {
    let model = MockServer::start_async().await;
    let server = common::make_server(&model.base_url()).await;
    let token = common::register(&server, "ana@example.com").await;

    let response = server
        .get("/api/segmentation-analyses/999")
        .authorization_bearer(&token)
        .await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Analysis not found");
}
