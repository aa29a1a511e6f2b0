//! Handlers for account endpoints.

use axum::{Extension, Form, Json, extract::State};
use validator::Validate;

use crate::api::dto::auth::{LoginForm, ProfileUpdateRequest, RegisterRequest, TokenResponse};
use crate::api::middleware::auth::CurrentUser;
use crate::domain::entities::User;
use crate::error::AppError;
use crate::state::AppState;

/// Creates an account and returns a session token for it.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// # Request Body
///
/// ```json
/// { "email": "ana@example.com", "password": "secret123", "name": "Ana" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the email is malformed, the password is too
/// short or the email is already registered.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    payload.validate()?;

    let token = state
        .auth_service
        .register(&payload.email, &payload.password, payload.name)
        .await?;

    Ok(Json(TokenResponse::bearer(token)))
}

/// Exchanges email and password for a session token.
///
/// # Endpoint
///
/// `POST /api/auth/login` (form-encoded `username`, `password`)
///
/// # Errors
///
/// Returns 401 Unauthorized on bad credentials.
pub async fn login_handler(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = state
        .auth_service
        .login(&form.username, &form.password)
        .await?;

    Ok(Json(TokenResponse::bearer(token)))
}

/// Returns the authenticated user.
///
/// # Endpoint
///
/// `GET /api/auth/me`
pub async fn me_handler(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<User> {
    Json(user)
}

/// Updates the authenticated user's name and avatar.
///
/// # Endpoint
///
/// `PUT /api/auth/profile`
///
/// # Errors
///
/// Returns 400 Bad Request for an invalid avatar URL.
pub async fn update_profile_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<ProfileUpdateRequest>,
) -> Result<Json<User>, AppError> {
    let updated = state
        .auth_service
        .update_profile(user.id, payload.into())
        .await?;

    Ok(Json(updated))
}
