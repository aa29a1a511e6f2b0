//! API route configuration.

use crate::api::handlers::{
    analyses_list_handler, analysis_handler, login_handler, marketing_strategies_handler,
    me_handler, register_handler, segmentation_insights_handler, update_profile_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Account creation and login, open to anonymous clients.
///
/// # Endpoints
///
/// - `POST /auth/register` - Create an account, returns a token
/// - `POST /auth/login`    - Form login, returns a token
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
}

/// Routes protected by Bearer token authentication
/// ([`crate::api::middleware::auth`]).
///
/// # Endpoints
///
/// - `GET  /auth/me`                      - Current user
/// - `PUT  /auth/profile`                 - Update name / avatar
/// - `POST /segmentation-insights`        - Generate segment insights
/// - `GET  /segmentation-analyses`        - Saved analyses, newest first
/// - `GET  /segmentation-analyses/{id}`   - One saved analysis
/// - `POST /marketing-strategies`         - Generate marketing strategies
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(me_handler))
        .route("/auth/profile", put(update_profile_handler))
        .route("/segmentation-insights", post(segmentation_insights_handler))
        .route("/segmentation-analyses", get(analyses_list_handler))
        .route("/segmentation-analyses/{id}", get(analysis_handler))
        .route("/marketing-strategies", post(marketing_strategies_handler))
}
