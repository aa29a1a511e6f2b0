//! In-memory implementation of [`AnalysisCache`].

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::service::AnalysisCache;
use crate::domain::entities::SegmentationInsights;

/// Process-local analysis cache guarded by a read-write lock.
#[derive(Default)]
pub struct MemoryAnalysisCache {
    entries: RwLock<HashMap<i64, SegmentationInsights>>,
}

impl MemoryAnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnalysisCache for MemoryAnalysisCache {
    async fn get(&self, user_id: i64) -> Option<SegmentationInsights> {
        self.entries.read().await.get(&user_id).cloned()
    }

    async fn put(&self, user_id: i64, insights: SegmentationInsights) {
        tracing::debug!(user_id, segments = insights.segments.len(), "Caching analysis");
        self.entries.write().await.insert(user_id, insights);
    }

    async fn clear(&self, user_id: i64) {
        self.entries.write().await.remove(&user_id);
    }
}
