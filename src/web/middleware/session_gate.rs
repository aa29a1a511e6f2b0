//! Cookie session gate for the web pages.

use axum::{
    extract::{Request, State},
    http::header::SET_COOKIE,
    middleware::Next,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};

use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::cookies::{SESSION_COOKIE, clear_session_cookie, read_cookie};

/// Path prefixes reachable without a session.
pub const PUBLIC_PATHS: &[&str] = &["/login", "/register"];

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/dashboard";

/// Returns true if `path` starts with one of [`PUBLIC_PATHS`].
pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|prefix| path.starts_with(prefix))
}

/// Guards every page by the `session_token` cookie.
///
/// # Rules
///
/// | Session | Public path | Result |
/// |---|---|---|
/// | valid | no | continue, with [`CurrentUser`] in extensions |
/// | valid | yes | redirect to `/dashboard` |
/// | missing or invalid | yes | continue |
/// | missing or invalid | no | redirect to `/login` |
///
/// A cookie that fails verification is cleared on the way out, so the
/// browser stops presenting it, unless the page sets a session cookie of its
/// own (a fresh login over a stale cookie). Errors other than a rejected
/// session, such as an unreachable database, end the request with a 500 and
/// leave the cookie alone.
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let public = is_public_path(req.uri().path());
    let token = read_cookie(req.headers(), SESSION_COOKIE);

    let user = match &token {
        Some(token) => match st.auth_service.authenticate(token).await {
            Ok(user) => Some(user),
            Err(AppError::Unauthorized { .. }) => None,
            Err(e) => {
                tracing::error!(error = %e, "Session check failed");
                return e.into_response();
            }
        },
        None => None,
    };
    let stale_cookie = token.is_some() && user.is_none();

    let response = match (user, public) {
        (Some(_), true) => Redirect::to(HOME_PATH).into_response(),
        (Some(user), false) => {
            req.extensions_mut().insert(CurrentUser(user));
            next.run(req).await
        }
        (None, true) => next.run(req).await,
        (None, false) => Redirect::to(LOGIN_PATH).into_response(),
    };

    if stale_cookie && !response.headers().contains_key(SET_COOKIE) {
        tracing::debug!("Clearing invalid session cookie");
        (
            AppendHeaders([(SET_COOKIE, clear_session_cookie(st.cookie_secure))]),
            response,
        )
            .into_response()
    } else {
        response
    }
}
