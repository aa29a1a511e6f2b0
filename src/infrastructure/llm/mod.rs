//! Generative model clients.
//!
//! - [`GeminiClient`] - Google Gemini `generateContent` over HTTPS

pub mod gemini_client;

pub use gemini_client::{GeminiClient, GeminiSettings};
