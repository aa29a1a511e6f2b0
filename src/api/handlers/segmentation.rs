//! Handlers for segment insights and saved analyses.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::domain::entities::{AnalysisMetadata, SegmentationInsights, SegmentationRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Generates segment insights for a CSV sample.
///
/// # Endpoint
///
/// `POST /api/segmentation-insights`
///
/// # Request Body
///
/// ```json
/// {
///   "clusterData": "id,age,spend\n1,34,120.5\n...",
///   "dataTreatment": { "normalize": true, "excludeNulls": true, "groupCategories": false },
///   "numberOfClusters": 3
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "textualInsights": "...",
///   "segments": [
///     { "name": "Loyal", "size": 120, "avg_purchase_value": 250.0,
///       "purchase_frequency": 12.0, "description": "..." }
///   ]
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the data is empty or `numberOfClusters < 1`
/// - 502 Bad Gateway if the model fails or returns invalid JSON
pub async fn segmentation_insights_handler(
    State(state): State<AppState>,
    Json(payload): Json<SegmentationRequest>,
) -> Result<Json<SegmentationInsights>, AppError> {
    let insights = state.segmentation_service.generate_insights(payload).await?;
    Ok(Json(insights))
}

/// Lists saved analyses, newest first.
///
/// # Endpoint
///
/// `GET /api/segmentation-analyses`
pub async fn analyses_list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<AnalysisMetadata>>, AppError> {
    Ok(Json(state.segmentation_service.list_analyses().await?))
}

/// Returns one saved analysis.
///
/// # Endpoint
///
/// `GET /api/segmentation-analyses/{id}`
///
/// # Errors
///
/// Returns 404 Not Found for an unknown ID.
pub async fn analysis_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SegmentationInsights>, AppError> {
    Ok(Json(state.segmentation_service.get_analysis(id).await?))
}
