//! Display-ready values for templates.
//!
//! Templates only print strings and loop over rows; all number formatting
//! and URL building happens here.

use chrono::{DateTime, Utc};

use crate::domain::entities::{AnalysisMetadata, Segment, SegmentationInsights};

/// One segment table row.
#[derive(Debug, Clone)]
pub struct SegmentRow {
    pub name: String,
    pub size: i64,
    pub share: String,
    pub avg_purchase_value: String,
    pub purchase_frequency: String,
    pub description: String,
    /// Strategies page prefilled with this segment.
    pub strategies_href: String,
}

impl SegmentRow {
    fn new(segment: &Segment, total: i64) -> Self {
        let prefill = format!("{}: {}", segment.name, segment.description);
        Self {
            name: segment.name.clone(),
            size: segment.size,
            share: format!("{:.1}%", segment.share_percent(total)),
            avg_purchase_value: format!("{:.2}", segment.avg_purchase_value),
            purchase_frequency: format!("{:.1}", segment.purchase_frequency),
            description: segment.description.clone(),
            strategies_href: format!("/strategies?segment={}", encode_query(&prefill)),
        }
    }
}

/// Summary figures plus rows for one analysis.
#[derive(Debug, Clone)]
pub struct InsightsView {
    pub textual_insights: String,
    pub total_customers: i64,
    pub segment_count: usize,
    pub average_purchase_value: String,
    pub rows: Vec<SegmentRow>,
}

impl From<&SegmentationInsights> for InsightsView {
    fn from(insights: &SegmentationInsights) -> Self {
        let total = insights.total_customers();
        Self {
            textual_insights: insights.textual_insights.clone(),
            total_customers: total,
            segment_count: insights.segments.len(),
            average_purchase_value: format!("{:.2}", insights.average_purchase_value()),
            rows: insights
                .segments
                .iter()
                .map(|s| SegmentRow::new(s, total))
                .collect(),
        }
    }
}

/// One row of the history table.
#[derive(Debug, Clone)]
pub struct HistoryRow {
    pub id: i64,
    pub timestamp: String,
    pub number_of_clusters: i64,
    pub snippet: String,
}

impl From<AnalysisMetadata> for HistoryRow {
    fn from(meta: AnalysisMetadata) -> Self {
        Self {
            id: meta.id,
            timestamp: format_timestamp(&meta.timestamp),
            number_of_clusters: meta.number_of_clusters,
            snippet: meta.original_data_snippet,
        }
    }
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn encode_query(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
