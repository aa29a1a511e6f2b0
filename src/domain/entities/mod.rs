//! Core domain entities.
//!
//! - [`User`] - A dashboard account
//! - [`Segment`] / [`SegmentationInsights`] - The result of one analysis
//! - [`AnalysisMetadata`] - Summary row of a saved analysis
//! - [`StrategyRequest`] / [`MarketingStrategies`] - Strategy generation
//!
//! Creation inputs follow the `NewX` pattern ([`NewUser`]) and partial
//! updates use patches ([`ProfilePatch`]).

pub mod analysis;
pub mod strategy;
pub mod user;

pub use analysis::{
    AnalysisMetadata, DataTreatment, Segment, SegmentationInsights, SegmentationRequest,
};
pub use strategy::{MarketingStrategies, StrategyRequest};
pub use user::{NewUser, ProfilePatch, User, UserCredentials};
