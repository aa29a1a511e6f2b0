//! Repository trait for saved segmentation analyses.

use crate::domain::entities::{AnalysisMetadata, SegmentationInsights, SegmentationRequest};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for saved analyses and their segments.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteAnalysisRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_analysis.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// Saves an analysis and all of its segments atomically.
    ///
    /// Returns the new analysis ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors; nothing is stored
    /// in that case.
    async fn save(
        &self,
        request: &SegmentationRequest,
        insights: &SegmentationInsights,
    ) -> Result<i64, AppError>;

    /// Lists metadata of all saved analyses, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<AnalysisMetadata>, AppError>;

    /// Loads a saved analysis with its segments in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<SegmentationInsights>, AppError>;

    /// Counts saved analyses.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
