//! Web page route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    MAX_UPLOAD_BYTES, dashboard_handler, history_detail_page, history_load, history_page, index,
    login_page, login_submit, logout, profile_page, profile_submit, register_page,
    register_submit, segmentation_page, segmentation_submit, strategies_page, strategies_submit,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

/// Pages and light form actions. Every route sits behind
/// [`crate::web::middleware::session_gate`], which decides between the page,
/// `/login` and `/dashboard` from the session cookie.
///
/// # Endpoints
///
/// - `GET  /`                   - Redirect to `/dashboard`
/// - `GET  /login`              - Login form
/// - `GET  /register`           - Registration form
/// - `POST /logout`             - Clear the session
/// - `GET  /dashboard`          - Current analysis overview
/// - `GET  /segmentation`       - CSV upload form
/// - `GET  /strategies`         - Strategy form
/// - `GET  /history`            - Saved analyses
/// - `GET  /history/{id}`       - One saved analysis
/// - `POST /history/{id}/load`  - Load an analysis into the dashboard
/// - `GET|POST /profile`        - Name and avatar
pub fn pages() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/login", get(login_page))
        .route("/register", get(register_page))
        .route("/logout", post(logout))
        .route("/dashboard", get(dashboard_handler))
        .route("/segmentation", get(segmentation_page))
        .route("/strategies", get(strategies_page))
        .route("/history", get(history_page))
        .route("/history/{id}", get(history_detail_page))
        .route("/history/{id}/load", post(history_load))
        .route("/profile", get(profile_page).post(profile_submit))
}

/// Form actions that check credentials or call the generative model.
/// Mounted under the same session gate as [`pages`], with the stricter
/// rate limit.
///
/// # Endpoints
///
/// - `POST /login`              - Sign in
/// - `POST /register`           - Create an account
/// - `POST /segmentation`       - CSV upload and insights
/// - `POST /strategies`         - Strategy generation
pub fn actions() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_submit))
        .route("/register", post(register_submit))
        .route(
            "/segmentation",
            post(segmentation_submit).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/strategies", post(strategies_submit))
}
