//! Marketing strategy generation.

use std::sync::Arc;
use validator::Validate;

use crate::application::prompts::{parse_reply, strategies_prompt};
use crate::domain::entities::{MarketingStrategies, StrategyRequest};
use crate::domain::model::GenerativeModel;
use crate::error::AppError;

/// Service that asks the generative model for strategies tailored to one
/// customer segment and campaign objective. Nothing is persisted.
pub struct StrategyService {
    model: Arc<dyn GenerativeModel>,
    language: String,
}

impl StrategyService {
    pub fn new(model: Arc<dyn GenerativeModel>, language: String) -> Self {
        Self { model, language }
    }

    /// Generates marketing strategies.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if either field is too short.
    ///
    /// Returns [`AppError::Upstream`] if the model fails or its reply is not
    /// a `marketingStrategies` JSON object.
    pub async fn generate_strategies(
        &self,
        request: StrategyRequest,
    ) -> Result<MarketingStrategies, AppError> {
        request.validate()?;

        let prompt = strategies_prompt(&request, &self.language);
        let reply = self.model.generate(&prompt).await?;
        let strategies: MarketingStrategies = parse_reply(&reply)?;

        tracing::info!(
            count = strategies.marketing_strategies.len(),
            "Marketing strategies generated"
        );

        Ok(strategies)
    }
}
