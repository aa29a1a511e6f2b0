mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use marketwise::routes::app_router_without_rate_limits;
use marketwise::utils::cookies::SESSION_COOKIE;

const NO_MODEL: &str = "http://127.0.0.1:9";

fn location(response: &axum_test::TestResponse) -> String {
    response.header("location").to_str().unwrap().to_string()
}

#[tokio::test]
async fn test_protected_page_redirects_to_login() {
    let server = common::make_server(NO_MODEL).await;

    for path in ["/", "/dashboard", "/segmentation", "/strategies", "/history", "/profile"] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login", "path {path}");
    }
}

#[tokio::test]
async fn test_public_pages_render_without_session() {
    let server = common::make_server(NO_MODEL).await;

    let login = server.get("/login").await;
    login.assert_status_ok();
    assert!(login.text().contains("name=\"password\""));

    server.get("/register").await.assert_status_ok();
}

#[tokio::test]
async fn test_signed_in_user_is_sent_to_dashboard() {
    let server = common::make_server(NO_MODEL).await;
    let token = common::register(&server, "ana@example.com").await;

    let response = server
        .get("/login")
        .add_header("Cookie", common::session_cookie(&token))
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let response = server
        .get("/")
        .add_header("Cookie", common::session_cookie(&token))
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_register_form_sets_cookie() {
    let server = common::make_server(NO_MODEL).await;

    let response = server
        .post("/register")
        .form(&[
            ("name", "Ana"),
            ("email", "ana@example.com"),
            ("password", common::TEST_PASSWORD),
        ])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let cookie = response.cookie(SESSION_COOKIE);
    assert!(!cookie.value().is_empty());
    assert_eq!(cookie.http_only(), Some(true));

    let dashboard = server
        .get("/dashboard")
        .add_header("Cookie", common::session_cookie(cookie.value()))
        .await;
    dashboard.assert_status_ok();
    let html = dashboard.text();
    assert!(html.contains("Welcome, Ana"));
    assert!(html.contains("No analysis yet."));
}

#[tokio::test]
async fn test_login_form_success_and_failure() {
    let server = common::make_server(NO_MODEL).await;
    common::register(&server, "ana@example.com").await;

    let response = server
        .post("/login")
        .form(&[("email", "ana@example.com"), ("password", "wrong-pass")])
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let html = response.text();
    assert!(html.contains("Incorrect email or password"));
    assert!(html.contains("value=\"ana@example.com\""));

    let response = server
        .post("/login")
        .form(&[("email", "ana@example.com"), ("password", common::TEST_PASSWORD)])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    assert!(!response.cookie(SESSION_COOKIE).value().is_empty());
}

#[tokio::test]
async fn test_register_form_duplicate_email() {
    let server = common::make_server(NO_MODEL).await;
    common::register(&server, "ana@example.com").await;

    let response = server
        .post("/register")
        .form(&[("email", "ana@example.com"), ("password", common::TEST_PASSWORD)])
        .await;

    response.assert_status_bad_request();
    assert!(response.text().contains("Email already registered"));
}

#[tokio::test]
async fn test_forged_cookie_is_cleared() {
    let server = common::make_server(NO_MODEL).await;

    let response = server
        .get("/dashboard")
        .add_header("Cookie", common::session_cookie("forged.token.value"))
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    let set_cookie = response.header("set-cookie").to_str().unwrap().to_string();
    assert!(set_cookie.starts_with(&format!("{SESSION_COOKIE}=;")));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let server = common::make_server(NO_MODEL).await;
    let token = common::register(&server, "ana@example.com").await;

    let response = server
        .post("/logout")
        .add_header("Cookie", common::session_cookie(&token))
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(
        response
            .header("set-cookie")
            .to_str()
            .unwrap()
            .contains("Max-Age=0")
    );
}

#[tokio::test]
async fn test_login_over_stale_cookie_keeps_new_session() {
    let server = common::make_server(NO_MODEL).await;
    common::register(&server, "ana@example.com").await;

    let response = server
        .post("/login")
        .add_header("Cookie", common::session_cookie("stale.forged.token"))
        .form(&[("email", "ana@example.com"), ("password", common::TEST_PASSWORD)])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    let session_cookies: Vec<String> = response
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .filter(|v| v.starts_with(&format!("{SESSION_COOKIE}=")))
        .collect();

    assert_eq!(session_cookies.len(), 1);
    let last = session_cookies.last().unwrap();
    assert!(!last.starts_with(&format!("{SESSION_COOKIE}=;")));
    assert!(!last.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_database_failure_keeps_session_cookie() {
    let pool = common::test_pool().await;
    let state = common::create_test_state(pool.clone(), NO_MODEL);
    let server = TestServer::new(app_router_without_rate_limits(state)).unwrap();
    let token = common::register(&server, "ana@example.com").await;

    pool.close().await;

    let response = server
        .get("/dashboard")
        .add_header("Cookie", common::session_cookie(&token))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().get("location").is_none());
    assert!(response.headers().get("set-cookie").is_none());
}
