//! HTML page handlers and form actions.

mod auth;
mod dashboard;
mod history;
mod profile;
mod segmentation;
mod strategies;

pub use auth::{login_page, login_submit, logout, register_page, register_submit};
pub use dashboard::{dashboard_handler, index};
pub use history::{history_detail_page, history_load, history_page};
pub use profile::{profile_page, profile_submit};
pub use segmentation::{MAX_UPLOAD_BYTES, segmentation_page, segmentation_submit};
pub use strategies::{GENERATION_FAILED, strategies_page, strategies_submit};
