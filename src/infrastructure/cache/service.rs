//! Cache trait for the analysis currently shown on each user's dashboard.

use async_trait::async_trait;

use crate::domain::entities::SegmentationInsights;

/// Per-user slot holding the latest analysis a user generated or loaded.
///
/// The dashboard reads from this slot; it is written by the segmentation
/// page and by "load into dashboard" on the history page. Entries are not
/// persisted and disappear on restart.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MemoryAnalysisCache`] - Process-local map
#[async_trait]
pub trait AnalysisCache: Send + Sync {
    /// Returns the user's latest analysis, if any.
    async fn get(&self, user_id: i64) -> Option<SegmentationInsights>;

    /// Replaces the user's latest analysis.
    async fn put(&self, user_id: i64, insights: SegmentationInsights);

    /// Forgets the user's latest analysis.
    async fn clear(&self, user_id: i64);
}
