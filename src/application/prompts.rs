//! Prompt construction and reply parsing for the generative model.

use serde::de::DeserializeOwned;
use serde_json::json;

use crate::domain::entities::{SegmentationRequest, StrategyRequest};
use crate::error::AppError;

const SEGMENTATION_SCHEMA: &str = r#"{
  "textualInsights": "string",
  "segments": [
    {
      "name": "string",
      "size": "integer",
      "avg_purchase_value": "number",
      "purchase_frequency": "number",
      "description": "string"
    }
  ]
}"#;

const STRATEGIES_SCHEMA: &str = r#"{
  "marketingStrategies": ["string"]
}"#;

/// Builds the prompt asking for exactly `number_of_clusters` segments.
pub fn segmentation_prompt(request: &SegmentationRequest, language: &str) -> String {
    let treatment = &request.data_treatment;
    format!(
        r#"You are an expert marketing analyst. Your output MUST be written in {language} and MUST be VALID JSON matching the schema below.

Analyze the characteristics of the customer data sample provided. Based on this sample, identify exactly {clusters} potential market segments.

Apply the following data treatments before the analysis:
- Normalize data: {normalize}
- Exclude nulls: {exclude_nulls}
- Group categories: {group_categories}

For each segment you must:
1. Give it a descriptive name (e.g. "High-Value Frequent Buyers", "New Shoppers", "Budget Spenders").
2. Estimate the segment size (number of customers).
3. Estimate the average purchase value.
4. Estimate the purchase frequency.
5. Write a short summary of the segment's key attributes and needs.

Finally, write a single combined textual summary of all segments in the "textualInsights" field.

The estimates must be derived logically from the sample data. Make sure the output is valid JSON following the expected schema.

Customer data sample (CSV format):
{data}

Expected JSON schema (for reference only, do NOT include it in the output):
{schema}
"#,
        clusters = request.number_of_clusters,
        normalize = treatment.normalize,
        exclude_nulls = treatment.exclude_nulls,
        group_categories = treatment.group_categories,
        data = request.cluster_data,
        schema = SEGMENTATION_SCHEMA,
    )
}

/// Builds the prompt asking for strategies for one segment and objective.
pub fn strategies_prompt(request: &StrategyRequest, language: &str) -> String {
    format!(
        r#"You are an expert marketing strategist. Your output MUST be written in {language} and MUST be VALID JSON matching the schema below.

Based on the customer segment description and the campaign objectives, generate personalized marketing strategies. Return an array of strategy strings in the "marketingStrategies" field.

Customer segment attributes: {attributes}
Campaign objectives: {objectives}

Expected JSON schema (for reference only, do NOT include it in the output):
{schema}
"#,
        attributes = request.customer_segment_attributes,
        objectives = request.campaign_objectives,
        schema = STRATEGIES_SCHEMA,
    )
}

/// Parses a model reply as JSON into `T`.
///
/// A surrounding markdown code fence (```` ```json ... ``` ````) is tolerated.
///
/// # Errors
///
/// Returns [`AppError::Upstream`] carrying the raw reply when it is not JSON
/// or does not match the expected shape.
pub fn parse_reply<T: DeserializeOwned>(reply: &str) -> Result<T, AppError> {
    let body = strip_code_fence(reply);
    serde_json::from_str(body).map_err(|e| {
        tracing::warn!(error = %e, "Model reply is not valid JSON for the expected schema");
        AppError::upstream(
            "The AI response is not valid JSON",
            json!({ "reason": e.to_string(), "response": reply }),
        )
    })
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening fence line.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{DataTreatment, MarketingStrategies, SegmentationInsights};

    fn request() -> SegmentationRequest {
        SegmentationRequest {
            cluster_data: "id,spend\n1,100".to_string(),
            data_treatment: DataTreatment {
                normalize: true,
                exclude_nulls: false,
                group_categories: true,
            },
            number_of_clusters: 4,
        }
    }

    #[test]
    fn test_segmentation_prompt_contents() {
        let prompt = segmentation_prompt(&request(), "Brazilian Portuguese");

        assert!(prompt.contains("written in Brazilian Portuguese"));
        assert!(prompt.contains("identify exactly 4 potential market segments"));
        assert!(prompt.contains("- Normalize data: true"));
        assert!(prompt.contains("- Exclude nulls: false"));
        assert!(prompt.contains("- Group categories: true"));
        assert!(prompt.contains("id,spend\n1,100"));
        assert!(prompt.contains("\"textualInsights\": \"string\""));
    }

    #[test]
    fn test_strategies_prompt_contents() {
        let prompt = strategies_prompt(
            &StrategyRequest {
                customer_segment_attributes: "Urban professionals 30-45".to_string(),
                campaign_objectives: "Boost Q3 sales".to_string(),
            },
            "English",
        );

        assert!(prompt.contains("written in English"));
        assert!(prompt.contains("Customer segment attributes: Urban professionals 30-45"));
        assert!(prompt.contains("Campaign objectives: Boost Q3 sales"));
        assert!(prompt.contains("\"marketingStrategies\""));
    }

    #[test]
    fn test_parse_plain_json() {
        let parsed: MarketingStrategies =
            parse_reply(r#"{"marketingStrategies": ["Email", "Ads"]}"#).unwrap();
        assert_eq!(parsed.marketing_strategies, vec!["Email", "Ads"]);
    }

    #[test]
    fn test_parse_fenced_json() {
        let reply = "```json\n{\"textualInsights\": \"ok\", \"segments\": []}\n```\n";
        let parsed: SegmentationInsights = parse_reply(reply).unwrap();
        assert_eq!(parsed.textual_insights, "ok");
    }

    #[test]
    fn test_parse_invalid_reply_keeps_raw_text() {
        let err = parse_reply::<MarketingStrategies>("Sure! Here are some ideas").unwrap_err();

        assert!(matches!(err, AppError::Upstream { .. }));
        let info = err.to_error_info();
        assert_eq!(info.message, "The AI response is not valid JSON");
        assert_eq!(info.details["response"], "Sure! Here are some ideas");
    }

    #[test]
    fn test_parse_schema_mismatch() {
        let err = parse_reply::<MarketingStrategies>(r#"{"strategies": []}"#).unwrap_err();
        assert!(matches!(err, AppError::Upstream { .. }));
    }
}
