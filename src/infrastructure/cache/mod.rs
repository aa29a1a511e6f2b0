//! Caching layer for each user's current dashboard analysis.
//!
//! Provides an [`AnalysisCache`] trait with one implementation:
//! - [`MemoryAnalysisCache`] - Process-local map behind a `tokio` lock

mod memory_cache;
mod service;

pub use memory_cache::MemoryAnalysisCache;
pub use service::AnalysisCache;
