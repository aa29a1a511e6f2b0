//! User entity and profile changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A dashboard user as exposed to clients (never carries the password hash).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

impl User {
    /// Name shown in the UI: the user's name, or the email when unnamed.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }

    /// Uppercase first letter of the display name, used as avatar fallback.
    pub fn initial(&self) -> String {
        self.display_name()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

/// A stored user together with its password hash.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
    pub hashed_password: String,
}

/// Partial update of a user profile.
///
/// `None` leaves a field unchanged, `Some(None)` clears it and
/// `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub name: Option<Option<String>>,
    pub avatar_url: Option<Option<String>>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.avatar_url.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: Option<&str>) -> User {
        User {
            id: 1,
            email: "ana@example.com".to_string(),
            name: name.map(str::to_string),
            avatar_url: None,
        }
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        assert_eq!(user(Some("Ana")).display_name(), "Ana");
        assert_eq!(user(None).display_name(), "ana@example.com");
    }

    #[test]
    fn test_initial() {
        assert_eq!(user(Some("ana")).initial(), "A");
        assert_eq!(user(None).initial(), "A");
    }

    #[test]
    fn test_empty_patch() {
        assert!(ProfilePatch::default().is_empty());
        assert!(
            !ProfilePatch {
                name: Some(None),
                avatar_url: None
            }
            .is_empty()
        );
    }
}
