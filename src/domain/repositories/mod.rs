//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - User accounts and profiles
//! - [`AnalysisRepository`] - Saved segmentation analyses
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod analysis_repository;
pub mod user_repository;

pub use analysis_repository::AnalysisRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use analysis_repository::MockAnalysisRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
