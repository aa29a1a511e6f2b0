//! Authentication service: registration, login, session tokens and profiles.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{NewUser, ProfilePatch, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::session_token::SessionTokens;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Profile fields submitted by a user. Blank values clear the field.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    fn into_patch(self) -> ProfilePatch {
        let normalize = |value: String| {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        ProfilePatch {
            name: self.name.map(normalize),
            avatar_url: self.avatar_url.map(normalize),
        }
    }
}

/// Service for user accounts and session authentication.
///
/// Passwords are stored as Argon2id hashes. Sessions are stateless signed
/// tokens (see [`SessionTokens`]); a token stays valid until it expires or
/// its user is deleted.
pub struct AuthService<R: UserRepository> {
    repository: Arc<R>,
    tokens: SessionTokens,
}

impl<R: UserRepository> AuthService<R> {
    /// Creates a new authentication service.
    pub fn new(repository: Arc<R>, tokens: SessionTokens) -> Self {
        Self { repository, tokens }
    }

    pub fn tokens(&self) -> &SessionTokens {
        &self.tokens
    }

    /// Registers a new user and returns a session token for it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - The email is malformed
    /// - The password is shorter than [`MIN_PASSWORD_LEN`]
    /// - The email is already registered
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<String>,
    ) -> Result<String, AppError> {
        let email = normalize_email(email);

        if !validator::ValidateEmail::validate_email(&email) {
            return Err(AppError::bad_request(
                "Invalid email address",
                json!({ "email": ["Invalid email address"] }),
            ));
        }

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::bad_request(
                "Password is too short",
                json!({ "password": [format!("Use at least {MIN_PASSWORD_LEN} characters")] }),
            ));
        }

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(already_registered(&email));
        }

        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let user = self
            .repository
            .create(NewUser {
                email: email.clone(),
                name,
                hashed_password: hash_password(password)?,
            })
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent registration.
                AppError::Conflict { .. } => already_registered(&email),
                other => other,
            })?;

        tracing::info!(user_id = user.id, "User registered");

        Ok(self.tokens.issue(&user))
    }

    /// Checks credentials and returns a session token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for an unknown email or a wrong
    /// password; the two cases are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let email = normalize_email(email);

        let credentials = self.repository.find_by_email(&email).await?;

        match credentials {
            Some(c) if verify_password(password, &c.hashed_password) => {
                tracing::info!(user_id = c.user.id, "User logged in");
                Ok(self.tokens.issue(&c.user))
            }
            _ => {
                tracing::info!("Rejected login attempt");
                Err(AppError::unauthorized(
                    "Incorrect email or password",
                    json!({}),
                ))
            }
        }
    }

    /// Resolves a session token to its user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is invalid or expired
    /// or its user no longer exists.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let claims = self.tokens.verify(token).map_err(|e| {
            tracing::debug!(reason = %e, "Session token rejected");
            credentials_error()
        })?;

        self.repository
            .find_by_id(claims.user_id)
            .await?
            .ok_or_else(credentials_error)
    }

    /// Updates the supplied profile fields of a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the avatar URL is not an http(s) URL.
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn update_profile(&self, user_id: i64, update: ProfileUpdate) -> Result<User, AppError> {
        let patch = update.into_patch();

        if let Some(Some(avatar_url)) = &patch.avatar_url {
            validate_avatar_url(avatar_url)?;
        }

        let user = if patch.is_empty() {
            self.repository.find_by_id(user_id).await?
        } else {
            self.repository.update_profile(user_id, &patch).await?
        };

        user.ok_or_else(|| AppError::not_found("User not found", json!({ "user_id": user_id })))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn already_registered(email: &str) -> AppError {
    AppError::bad_request("Email already registered", json!({ "email": email }))
}

fn credentials_error() -> AppError {
    AppError::unauthorized("Could not validate credentials", json!({}))
}

fn validate_avatar_url(raw: &str) -> Result<(), AppError> {
    match url::Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(AppError::bad_request(
            "Invalid avatar URL",
            json!({ "avatar_url": ["Use an http or https URL"] }),
        )),
    }
}
