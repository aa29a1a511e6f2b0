mod common;

use serde_json::Value;

#[tokio::test]
async fn test_health_check() {
    let server = common::make_server("http://127.0.0.1:9").await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["checks"]["database"]["status"], "ok");
    assert_eq!(
        body["checks"]["database"]["message"],
        "Connected, 0 saved analyses"
    );
    assert_eq!(body["checks"]["model"]["status"], "ok");
    assert_eq!(body["checks"]["model"]["message"], common::TEST_MODEL);
}

#[tokio::test]
async fn test_health_is_public() {
    let server = common::make_server("http://127.0.0.1:9").await;

    // No bearer token and no session cookie
    server.get("/health").await.assert_status_ok();
}
