//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, the generative model and
//! validation, and give HTTP handlers and page actions one API to call.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Accounts, login and session tokens
//! - [`services::segmentation_service::SegmentationService`] - Segment insights and saved analyses
//! - [`services::strategy_service::StrategyService`] - Marketing strategy generation
//!
//! Prompt text and model reply parsing live in [`prompts`].

pub mod prompts;
pub mod services;
