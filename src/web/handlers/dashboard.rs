//! Dashboard home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Redirect},
};

use crate::api::middleware::auth::CurrentUser;
use crate::domain::entities::User;
use crate::state::AppState;
use crate::web::view::InsightsView;

/// Template for the dashboard home page.
///
/// Renders `templates/dashboard.html` with the summary figures and segment
/// table of the user's current analysis, or an empty state.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub user: User,
    pub analysis: Option<InsightsView>,
}

/// `GET /`
pub async fn index() -> Redirect {
    Redirect::to("/dashboard")
}

/// Renders the dashboard home page.
///
/// # Endpoint
///
/// `GET /dashboard`
///
/// Reads the analysis cached by the segmentation page or by loading one
/// from history.
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> impl IntoResponse {
    let analysis = state
        .analysis_cache
        .get(user.id)
        .await
        .as_ref()
        .map(InsightsView::from);

    DashboardTemplate { user, analysis }
}
