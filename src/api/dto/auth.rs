//! DTOs for authentication and profile endpoints.

use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use validator::Validate;

use crate::application::services::ProfileUpdate;

/// Request to create a new account.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "Use at least 6 characters"))]
    pub password: String,

    #[validate(length(max = 100))]
    pub name: Option<String>,
}

/// OAuth2 password-flow login form; `username` carries the email.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Issued session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Partial profile update.
///
/// An omitted field is left unchanged; `null` or a blank string clears it.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdateRequest {
    #[serde(default, with = "double_option")]
    pub name: Option<Option<String>>,

    #[serde(default, with = "double_option")]
    pub avatar_url: Option<Option<String>>,
}

impl From<ProfileUpdateRequest> for ProfileUpdate {
    fn from(request: ProfileUpdateRequest) -> Self {
        ProfileUpdate {
            name: request.name.map(Option::unwrap_or_default),
            avatar_url: request.avatar_url.map(Option::unwrap_or_default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_update_distinguishes_null_and_missing() {
        let request: ProfileUpdateRequest =
            serde_json::from_value(json!({ "name": null })).unwrap();
        let update = ProfileUpdate::from(request);

        assert_eq!(update.name.as_deref(), Some(""));
        assert!(update.avatar_url.is_none());
    }

    #[test]
    fn test_register_validation() {
        let request = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "123".to_string(),
            name: None,
        };

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }
}
