//! Strategies page: segment and objective form with generated strategies.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use validator::Validate;

use crate::api::middleware::auth::CurrentUser;
use crate::domain::entities::{StrategyRequest, User};
use crate::error::AppError;
use crate::state::AppState;

pub const GENERATION_FAILED: &str = "An error occurred while generating the strategies.";

#[derive(Template, WebTemplate)]
#[template(path = "strategies.html")]
pub struct StrategiesTemplate {
    pub user: User,
    pub customer_segment_attributes: String,
    pub campaign_objectives: String,
    pub segment_error: Option<String>,
    pub objectives_error: Option<String>,
    pub error: Option<String>,
    pub strategies: Vec<String>,
}

impl StrategiesTemplate {
    fn blank(user: User, customer_segment_attributes: String) -> Self {
        Self {
            user,
            customer_segment_attributes,
            campaign_objectives: String::new(),
            segment_error: None,
            objectives_error: None,
            error: None,
            strategies: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StrategiesQuery {
    pub segment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StrategyFormData {
    #[serde(default)]
    pub customer_segment_attributes: String,
    #[serde(default)]
    pub campaign_objectives: String,
}

/// `GET /strategies[?segment=...]`
pub async fn strategies_page(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<StrategiesQuery>,
) -> impl IntoResponse {
    StrategiesTemplate::blank(user, query.segment.unwrap_or_default())
}

/// `POST /strategies`
///
/// Field errors are shown next to each field under an "Invalid form data."
/// banner; a model failure shows a single generic message.
pub async fn strategies_submit(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Form(form): Form<StrategyFormData>,
) -> Response {
    let request = StrategyRequest {
        customer_segment_attributes: form.customer_segment_attributes.trim().to_string(),
        campaign_objectives: form.campaign_objectives.trim().to_string(),
    };

    let mut page = StrategiesTemplate::blank(user, form.customer_segment_attributes);
    page.campaign_objectives = form.campaign_objectives;

    if let Err(errors) = request.validate() {
        let fields = errors.field_errors();
        let first_message = |field: &str| {
            fields
                .get(field)
                .and_then(|errs| errs.first())
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
        };
        page.segment_error = first_message("customer_segment_attributes");
        page.objectives_error = first_message("campaign_objectives");
        page.error = Some(AppError::from(errors).message().to_string());
        return (StatusCode::BAD_REQUEST, page).into_response();
    }

    match state.strategy_service.generate_strategies(request).await {
        Ok(result) => {
            page.strategies = result.marketing_strategies;
            page.into_response()
        }
        Err(e) => {
            tracing::warn!(user_id = page.user.id, error = %e, "Strategy generation failed");
            page.error = Some(GENERATION_FAILED.to_string());
            (e.status(), page).into_response()
        }
    }
}
