//! Domain layer containing business entities and ports.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits and the [`model::GenerativeModel`] port define
//! contracts implemented by the infrastructure layer; business rules live in
//! [`crate::application::services`].
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//! - [`model`] - Generative language model port

pub mod entities;
pub mod model;
pub mod repositories;
