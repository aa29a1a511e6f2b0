//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: DB, model (public)
//! - `/api/auth/*`       - Register and login (public)
//! - `/api/*`            - REST API (Bearer token required)
//! - `/*`                - Web pages (cookie session gate)
//! - `/static/*`         - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket: strict on API, login, registration
//!   and model-calling form actions, looser on page views
//! - **Authentication** - Bearer token (API) or cookie session (web)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::middleware::session_gate;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build(state, Some(behind_proxy)))
}

/// Same routes and middleware as [`app_router`] minus rate limiting, which
/// needs the peer address that in-process clients (tests) do not have.
pub fn app_router_without_rate_limits(state: AppState) -> Router {
    build(state, None)
}

fn build(state: AppState, rate_limits: Option<bool>) -> Router {
    let mut api_public = api::routes::public_routes();
    let mut api_protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
    let gate = middleware::from_fn_with_state(state.clone(), session_gate::layer);
    let mut web_pages = web::routes::pages().route_layer(gate.clone());
    let mut web_actions = web::routes::actions().route_layer(gate);

    if let Some(behind_proxy) = rate_limits {
        api_public = api_public.layer(rate_limit::secure_layer(behind_proxy));
        api_protected = api_protected.layer(rate_limit::secure_layer(behind_proxy));
        web_pages = web_pages.layer(rate_limit::layer(behind_proxy));
        web_actions = web_actions.layer(rate_limit::secure_layer(behind_proxy));
    }

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_public.merge(api_protected))
        .merge(web_pages)
        .merge(web_actions)
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer())
}
