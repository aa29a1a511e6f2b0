//! Web layer for the browser UI.
//!
//! Server-rendered Askama pages and their form actions. Pages call the
//! application services in-process.
//!
//! # Modules
//!
//! - [`handlers`] - Page rendering and form actions
//! - [`middleware`] - Session gate
//! - [`routes`] - Page route configuration
//! - [`view`] - Display-ready values for templates

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod view;
