//! SQLite implementation of the analysis repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{
    AnalysisMetadata, Segment, SegmentationInsights, SegmentationRequest,
};
use crate::domain::repositories::AnalysisRepository;
use crate::error::AppError;

/// SQLite repository for saved analyses.
///
/// An analysis row stores the submitted CSV sample, the data-treatment flags
/// and the textual insights; its segments live in `segments` and are deleted
/// with it.
pub struct SqliteAnalysisRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteAnalysisRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct MetadataRow {
    id: i64,
    timestamp: DateTime<Utc>,
    number_of_clusters: i64,
    original_csv_data: Option<String>,
}

#[derive(sqlx::FromRow)]
struct SegmentRow {
    name: String,
    size: i64,
    avg_purchase_value: f64,
    purchase_frequency: f64,
    description: String,
}

impl From<SegmentRow> for Segment {
    fn from(row: SegmentRow) -> Self {
        Segment {
            name: row.name,
            size: row.size,
            avg_purchase_value: row.avg_purchase_value,
            purchase_frequency: row.purchase_frequency,
            description: row.description,
        }
    }
}

#[async_trait]
impl AnalysisRepository for SqliteAnalysisRepository {
    async fn save(
        &self,
        request: &SegmentationRequest,
        insights: &SegmentationInsights,
    ) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await?;

        let treatment = request.data_treatment;
        let analysis_id = sqlx::query(
            r#"
            INSERT INTO analyses (
                textual_insights,
                original_csv_data,
                data_treatment_normalize,
                data_treatment_exclude_nulls,
                data_treatment_group_categories,
                number_of_clusters
            )
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&insights.textual_insights)
        .bind(&request.cluster_data)
        .bind(treatment.normalize)
        .bind(treatment.exclude_nulls)
        .bind(treatment.group_categories)
        .bind(request.number_of_clusters)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for segment in &insights.segments {
            sqlx::query(
                r#"
                INSERT INTO segments (
                    analysis_id, name, size, avg_purchase_value, purchase_frequency, description
                )
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(analysis_id)
            .bind(&segment.name)
            .bind(segment.size)
            .bind(segment.avg_purchase_value)
            .bind(segment.purchase_frequency)
            .bind(&segment.description)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(analysis_id)
    }

    async fn list(&self) -> Result<Vec<AnalysisMetadata>, AppError> {
        let rows = sqlx::query_as::<_, MetadataRow>(
            r#"
            SELECT id, timestamp, number_of_clusters, original_csv_data
            FROM analyses
            ORDER BY timestamp DESC, id DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| AnalysisMetadata {
                id: row.id,
                timestamp: row.timestamp,
                number_of_clusters: row.number_of_clusters,
                original_data_snippet: AnalysisMetadata::snippet(
                    row.original_csv_data.as_deref(),
                ),
            })
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<SegmentationInsights>, AppError> {
        let textual_insights: Option<String> =
            sqlx::query_scalar("SELECT textual_insights FROM analyses WHERE id = ?")
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        let Some(textual_insights) = textual_insights else {
            return Ok(None);
        };

        let segments = sqlx::query_as::<_, SegmentRow>(
            r#"
            SELECT name, size, avg_purchase_value, purchase_frequency, description
            FROM segments
            WHERE analysis_id = ?
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(Some(SegmentationInsights {
            textual_insights,
            segments: segments.into_iter().map(Into::into).collect(),
        }))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM analyses")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
