//! Login, registration and logout pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::state::AppState;
use crate::utils::cookies::{clear_session_cookie, session_cookie};
use crate::web::middleware::session_gate::{HOME_PATH, LOGIN_PATH};

#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub email: String,
    pub error: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub name: String,
    pub email: String,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginFormData {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterFormData {
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub password: String,
}

/// `GET /login`
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate {
        email: String::new(),
        error: None,
    }
}

/// `POST /login`
///
/// Sets the session cookie and redirects to the dashboard, or re-renders
/// the form with the error message.
pub async fn login_submit(
    State(state): State<AppState>,
    Form(form): Form<LoginFormData>,
) -> Response {
    match state.auth_service.login(&form.email, &form.password).await {
        Ok(token) => signed_in(&state, &token),
        Err(e) => (
            e.status(),
            LoginTemplate {
                email: form.email,
                error: Some(e.message().to_string()),
            },
        )
            .into_response(),
    }
}

/// `GET /register`
pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate {
        name: String::new(),
        email: String::new(),
        error: None,
    }
}

/// `POST /register`
pub async fn register_submit(
    State(state): State<AppState>,
    Form(form): Form<RegisterFormData>,
) -> Response {
    let name = Some(form.name.clone()).filter(|n| !n.trim().is_empty());

    match state
        .auth_service
        .register(&form.email, &form.password, name)
        .await
    {
        Ok(token) => signed_in(&state, &token),
        Err(e) => (
            e.status(),
            RegisterTemplate {
                name: form.name,
                email: form.email,
                error: Some(e.message().to_string()),
            },
        )
            .into_response(),
    }
}

/// `POST /logout`
pub async fn logout(State(state): State<AppState>) -> Response {
    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie(state.cookie_secure))]),
        Redirect::to(LOGIN_PATH),
    )
        .into_response()
}

fn signed_in(state: &AppState, token: &str) -> Response {
    let cookie = session_cookie(token, state.session_max_age(), state.cookie_secure);
    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Redirect::to(HOME_PATH),
    )
        .into_response()
}
