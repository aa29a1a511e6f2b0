//! Business logic services for the application layer.

pub mod auth_service;
pub mod segmentation_service;
pub mod strategy_service;

pub use auth_service::{AuthService, ProfileUpdate};
pub use segmentation_service::SegmentationService;
pub use strategy_service::StrategyService;
