//! Segment insight generation and saved-analysis retrieval.

use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::application::prompts::{parse_reply, segmentation_prompt};
use crate::domain::entities::{AnalysisMetadata, SegmentationInsights, SegmentationRequest};
use crate::domain::model::GenerativeModel;
use crate::domain::repositories::AnalysisRepository;
use crate::error::AppError;

/// Service that asks the generative model for market segments and keeps a
/// history of the analyses it produced.
pub struct SegmentationService<A: AnalysisRepository> {
    repository: Arc<A>,
    model: Arc<dyn GenerativeModel>,
    language: String,
}

impl<A: AnalysisRepository> SegmentationService<A> {
    /// Creates a new segmentation service answering in `language`.
    pub fn new(repository: Arc<A>, model: Arc<dyn GenerativeModel>, language: String) -> Self {
        Self {
            repository,
            model,
            language,
        }
    }

    /// Generates segment insights for a CSV sample and saves the analysis.
    ///
    /// Saving is best effort: a database failure is logged and the insights
    /// are still returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the data is empty or fewer than
    /// one cluster is requested.
    ///
    /// Returns [`AppError::Upstream`] if the model fails or its reply is not
    /// valid insights JSON.
    pub async fn generate_insights(
        &self,
        request: SegmentationRequest,
    ) -> Result<SegmentationInsights, AppError> {
        request.validate()?;

        let prompt = segmentation_prompt(&request, &self.language);
        let reply = self.model.generate(&prompt).await?;
        let insights: SegmentationInsights = parse_reply(&reply)?;

        if insights.segments.len() as i64 != request.number_of_clusters {
            tracing::warn!(
                requested = request.number_of_clusters,
                returned = insights.segments.len(),
                "Model returned a different number of segments than requested"
            );
        }

        match self.repository.save(&request, &insights).await {
            Ok(id) => tracing::info!(
                analysis_id = id,
                segments = insights.segments.len(),
                "Analysis saved"
            ),
            Err(e) => tracing::error!(error = %e, "Failed to save analysis"),
        }

        Ok(insights)
    }

    /// Lists saved analyses, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_analyses(&self) -> Result<Vec<AnalysisMetadata>, AppError> {
        self.repository.list().await
    }

    /// Loads a saved analysis.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no analysis has this ID.
    pub async fn get_analysis(&self, id: i64) -> Result<SegmentationInsights, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Analysis not found", json!({ "id": id })))
    }

    /// Counts saved analyses.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count_analyses(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}
