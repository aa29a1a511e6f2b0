//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Segmentation and strategy payloads are the domain
//! entities themselves, since their wire format is fixed.

pub mod auth;
pub mod health;
