//! Handler for marketing strategy generation.

use axum::{Json, extract::State};

use crate::domain::entities::{MarketingStrategies, StrategyRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Generates marketing strategies for a segment and campaign objective.
///
/// # Endpoint
///
/// `POST /api/marketing-strategies`
///
/// # Request Body
///
/// ```json
/// {
///   "customerSegmentAttributes": "Urban professionals aged 30-45",
///   "campaignObjectives": "Increase repeat purchases by 20%"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if either field is shorter than 10 characters
/// - 502 Bad Gateway if the model fails or returns invalid JSON
pub async fn marketing_strategies_handler(
    State(state): State<AppState>,
    Json(payload): Json<StrategyRequest>,
) -> Result<Json<MarketingStrategies>, AppError> {
    Ok(Json(
        state.strategy_service.generate_strategies(payload).await?,
    ))
}
