//! Saved analyses: list, detail and "load into dashboard".

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::api::middleware::auth::CurrentUser;
use crate::domain::entities::User;
use crate::state::AppState;
use crate::web::view::{HistoryRow, InsightsView};

#[derive(Template, WebTemplate)]
#[template(path = "history.html")]
pub struct HistoryTemplate {
    pub user: User,
    pub analyses: Vec<HistoryRow>,
    pub error: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "history_detail.html")]
pub struct HistoryDetailTemplate {
    pub user: User,
    pub id: i64,
    pub analysis: Option<InsightsView>,
    pub error: Option<String>,
}

/// `GET /history`
pub async fn history_page(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Response {
    match state.segmentation_service.list_analyses().await {
        Ok(analyses) => HistoryTemplate {
            user,
            analyses: analyses.into_iter().map(HistoryRow::from).collect(),
            error: None,
        }
        .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            HistoryTemplate {
                user,
                analyses: Vec::new(),
                error: Some(format!("Could not load the analysis history: {}", e.message())),
            },
        )
            .into_response(),
    }
}

/// `GET /history/{id}`
pub async fn history_detail_page(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Response {
    match state.segmentation_service.get_analysis(id).await {
        Ok(insights) => HistoryDetailTemplate {
            user,
            id,
            analysis: Some(InsightsView::from(&insights)),
            error: None,
        }
        .into_response(),
        Err(e) => detail_error(user, id, e.status(), e.message()),
    }
}

/// `POST /history/{id}/load`
///
/// Makes a saved analysis the user's current dashboard analysis.
pub async fn history_load(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Response {
    match state.segmentation_service.get_analysis(id).await {
        Ok(insights) => {
            state.analysis_cache.put(user.id, insights).await;
            tracing::info!(user_id = user.id, analysis_id = id, "Analysis loaded into dashboard");
            Redirect::to("/dashboard").into_response()
        }
        Err(e) => detail_error(user, id, e.status(), e.message()),
    }
}

fn detail_error(user: User, id: i64, status: StatusCode, message: &str) -> Response {
    (
        status,
        HistoryDetailTemplate {
            user,
            id,
            analysis: None,
            error: Some(message.to_string()),
        },
    )
        .into_response()
}
