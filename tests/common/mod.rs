#![allow(dead_code)]

use axum_test::TestServer;
use chrono::Duration;
use httpmock::prelude::*;
use httpmock::Mock;
use marketwise::domain::model::GenerativeModel;
use marketwise::infrastructure::llm::{GeminiClient, GeminiSettings};
use marketwise::infrastructure::persistence::MIGRATOR;
use marketwise::routes::app_router_without_rate_limits;
use marketwise::state::{AppState, SessionSettings};
use marketwise::utils::cookies::SESSION_COOKIE;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;

pub const TEST_MODEL: &str = "gemini-test";
pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_SECRET: &str = "test-session-secret";
pub const TEST_PASSWORD: &str = "s3cret-pass";

pub const GENERATE_PATH: &str = "/models/gemini-test:generateContent";

pub const INSIGHTS_REPLY: &str = r#"{
    "textualInsights": "Two clear groups of buyers",
    "segments": [
        {"name": "Loyal", "size": 120, "avg_purchase_value": 250.0, "purchase_frequency": 12.0, "description": "High spenders"},
        {"name": "New", "size": 80, "avg_purchase_value": 40.5, "purchase_frequency": 1.5, "description": "Recent sign-ups"}
    ]
}"#;

pub const STRATEGIES_REPLY: &str =
    r#"{"marketingStrategies": ["Launch a loyalty program", "Offer referral bonuses"]}"#;

/// Fresh in-memory database with the schema applied.
///
/// One connection that never expires, so the database lives as long as the pool.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();

    MIGRATOR.run(&pool).await.unwrap();
    pool
}

pub fn test_model(base_url: &str) -> Arc<dyn GenerativeModel> {
    Arc::new(
        GeminiClient::new(GeminiSettings {
            api_key: TEST_API_KEY.to_string(),
            model: TEST_MODEL.to_string(),
            base_url: base_url.to_string(),
            timeout: std::time::Duration::from_secs(5),
        })
        .unwrap(),
    )
}

pub fn create_test_state(pool: SqlitePool, model_base_url: &str) -> AppState {
    AppState::new(
        Arc::new(pool),
        test_model(model_base_url),
        SessionSettings {
            secret: TEST_SECRET.to_string(),
            ttl: Duration::minutes(60),
            cookie_secure: false,
        },
        "English".to_string(),
    )
}

/// Full application router (without rate limiting) over a fresh database.
pub async fn make_server(model_base_url: &str) -> TestServer {
    let state = create_test_state(test_pool().await, model_base_url);
    TestServer::new(app_router_without_rate_limits(state)).unwrap()
}

/// Model API reply wrapping `text` the way Gemini does.
pub fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [
            { "content": { "role": "model", "parts": [ { "text": text } ] } }
        ]
    })
}

/// Mocks one successful `generateContent` call answering `text`.
pub async fn mock_generate<'a>(server: &'a MockServer, text: &str) -> Mock<'a> {
    let body = gemini_reply(text);
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(GENERATE_PATH)
                .header("x-goog-api-key", TEST_API_KEY);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(body);
        })
        .await
}

/// Registers an account through the API and returns its bearer token.
pub async fn register(server: &TestServer, email: &str) -> String {
    let response = server
        .post("/api/auth/register")
        .json(&json!({ "email": email, "password": TEST_PASSWORD, "name": "Ana" }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// `Cookie` header value carrying a session token.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}")
}
