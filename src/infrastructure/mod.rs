//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for persistence, the generative model and the
//! dashboard cache.
//!
//! # Modules
//!
//! - [`cache`] - Per-user latest-analysis cache
//! - [`llm`] - Google Gemini client
//! - [`persistence`] - SQLite repository implementations

pub mod cache;
pub mod llm;
pub mod persistence;
