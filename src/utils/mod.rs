//! Utility functions shared across layers.
//!
//! - [`session_token`] - Signed session token issuing and verification
//! - [`password`] - Argon2 password hashing
//! - [`csv_sample`] - CSV sampling before model submission
//! - [`cookies`] - Session cookie parsing and construction

pub mod cookies;
pub mod csv_sample;
pub mod password;
pub mod session_token;
