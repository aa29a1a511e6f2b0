//! Marketing strategy entities.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Segment description and campaign goals to generate strategies for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StrategyRequest {
    #[validate(length(
        min = 10,
        message = "Please provide more details about the customer segment."
    ))]
    pub customer_segment_attributes: String,
    #[validate(length(
        min = 10,
        message = "Please provide more details about the campaign objectives."
    ))]
    pub campaign_objectives: String,
}

/// Personalized strategies returned by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingStrategies {
    pub marketing_strategies: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_messages() {
        let request = StrategyRequest {
            customer_segment_attributes: "short".to_string(),
            campaign_objectives: "Grow Q3 sales by 15 percent".to_string(),
        };

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("customer_segment_attributes"));
        assert!(!fields.contains_key("campaign_objectives"));
    }

    #[test]
    fn test_wire_format() {
        let strategies: MarketingStrategies = serde_json::from_value(json!({
            "marketingStrategies": ["Loyalty program", "Referral bonus"]
        }))
        .unwrap();
        assert_eq!(strategies.marketing_strategies.len(), 2);
    }
}
