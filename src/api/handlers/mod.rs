//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod health;
pub mod segmentation;
pub mod strategies;

pub use auth::{login_handler, me_handler, register_handler, update_profile_handler};
pub use health::health_handler;
pub use segmentation::{analyses_list_handler, analysis_handler, segmentation_insights_handler};
pub use strategies::marketing_strategies_handler;
