//! Port to the external generative language model.

use async_trait::async_trait;
use thiserror::Error;

/// Failures reported by a [`GenerativeModel`] implementation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("model request failed: {0}")]
    Transport(String),

    #[error("model returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("model response could not be decoded: {0}")]
    Decode(String),

    #[error("model response was empty")]
    Empty,
}

/// A text-in, text-out generative model.
///
/// Implementations send the prompt as-is and return the raw reply text;
/// parsing the reply is the caller's job. Failures are reported once and
/// never retried.
///
/// # Implementations
///
/// - [`crate::infrastructure::llm::GeminiClient`] - Google Gemini over HTTPS
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Sends `prompt` and returns the model's reply text.
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;

    /// Model identifier, for logs and health output.
    fn model_name(&self) -> String;
}
