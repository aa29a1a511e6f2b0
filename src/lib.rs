//! # MarketWise
//!
//! A customer segmentation and marketing strategy dashboard built with Axum,
//! SQLite and a Gemini generative model.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core entities, repository traits and the model port
//! - **Application Layer** ([`application`]) - Services, prompts and reply parsing
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite, analysis cache and Gemini client
//! - **API Layer** ([`api`]) - JSON REST API handlers, DTOs and middleware
//! - **Web Layer** ([`web`]) - Server-rendered pages behind a cookie session
//!
//! ## Features
//!
//! - Segment insights from an uploaded customer CSV sample
//! - Marketing strategies for a segment and campaign objective
//! - Saved analysis history that can be reloaded into the dashboard
//! - Email/password accounts with signed session tokens
//! - Rate limiting and structured logging
//!
//! ## Quick Start
//!
//! ```bash
//! export SESSION_SECRET="change-me"
//! export GEMINI_API_KEY="..."
//!
//! # Migrations run on startup
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, SegmentationService, StrategyService};
    pub use crate::domain::entities::{
        AnalysisMetadata, MarketingStrategies, Segment, SegmentationInsights, SegmentationRequest,
        StrategyRequest, User,
    };
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
