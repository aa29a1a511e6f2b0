//! Profile page: name and avatar.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::api::middleware::auth::CurrentUser;
use crate::application::services::ProfileUpdate;
use crate::domain::entities::User;
use crate::state::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub user: User,
    pub success: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileFormData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar_url: String,
}

/// `GET /profile`
pub async fn profile_page(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> impl IntoResponse {
    ProfileTemplate {
        user,
        success: None,
        error: None,
    }
}

/// `POST /profile`
///
/// Both fields are always submitted; a blank field clears the value.
pub async fn profile_submit(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Form(form): Form<ProfileFormData>,
) -> Response {
    let update = ProfileUpdate {
        name: Some(form.name),
        avatar_url: Some(form.avatar_url),
    };

    match state.auth_service.update_profile(user.id, update).await {
        Ok(updated) => ProfileTemplate {
            user: updated,
            success: Some("Profile updated.".to_string()),
            error: None,
        }
        .into_response(),
        Err(e) => (
            e.status(),
            ProfileTemplate {
                user,
                success: None,
                error: Some(e.message().to_string()),
            },
        )
            .into_response(),
    }
}
