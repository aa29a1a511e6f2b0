//! Segmentation analysis entities.
//!
//! These mirror the JSON exchanged with the generative model and with API
//! clients, so field names follow the wire format (`textualInsights`,
//! `avg_purchase_value`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use validator::Validate;

/// Maximum number of characters kept from the first CSV line in a snippet.
pub const SNIPPET_MAX_CHARS: usize = 50;

/// Preprocessing hints forwarded to the model with the data sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTreatment {
    pub normalize: bool,
    pub exclude_nulls: bool,
    pub group_categories: bool,
}

impl Default for DataTreatment {
    fn default() -> Self {
        Self {
            normalize: true,
            exclude_nulls: true,
            group_categories: false,
        }
    }
}

/// A request for segment insights over a CSV sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationRequest {
    #[validate(length(min = 1, message = "No customer data provided."))]
    pub cluster_data: String,
    pub data_treatment: DataTreatment,
    #[validate(range(min = 1, message = "At least one segment is required."))]
    pub number_of_clusters: i64,
}

/// An AI-identified cluster of customers sharing purchase behavior.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub name: String,
    #[serde(deserialize_with = "whole_number")]
    pub size: i64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub avg_purchase_value: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub purchase_frequency: f64,
    pub description: String,
}

impl Segment {
    /// Share of `total` customers that belong to this segment, in percent.
    pub fn share_percent(&self, total: i64) -> f64 {
        if total <= 0 {
            return 0.0;
        }
        self.size as f64 * 100.0 / total as f64
    }
}

/// Textual insights plus segment records returned for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationInsights {
    #[serde(rename = "textualInsights")]
    pub textual_insights: String,
    pub segments: Vec<Segment>,
}

impl SegmentationInsights {
    pub fn total_customers(&self) -> i64 {
        self.segments.iter().map(|s| s.size).sum()
    }

    /// Average purchase value across all customers, weighted by segment size.
    pub fn average_purchase_value(&self) -> f64 {
        let total = self.total_customers();
        if total <= 0 {
            return 0.0;
        }
        let value: f64 = self
            .segments
            .iter()
            .map(|s| s.avg_purchase_value * s.size as f64)
            .sum();
        value / total as f64
    }
}

/// Summary row of a saved analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub number_of_clusters: i64,
    pub original_data_snippet: String,
}

impl AnalysisMetadata {
    /// Builds the snippet shown for a saved dataset: its first line cut to
    /// [`SNIPPET_MAX_CHARS`] characters, followed by `...`.
    pub fn snippet(csv: Option<&str>) -> String {
        let first_line = csv
            .unwrap_or_default()
            .split('\n')
            .next()
            .unwrap_or_default()
            .trim_end_matches('\r');
        let head: String = first_line.chars().take(SNIPPET_MAX_CHARS).collect();
        format!("{head}...")
    }
}

/// Accepts `12`, `12.0` and `"12"` for integer fields; models are not
/// always strict about number formatting.
fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(n) => Ok(n),
        Raw::Float(f) if f.is_finite() && f.fract() == 0.0 => Ok(f as i64),
        Raw::Float(f) => Err(de::Error::custom(format!(
            "expected a whole number, got {f}"
        ))),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected a whole number, got {s:?}"))),
    }
}
