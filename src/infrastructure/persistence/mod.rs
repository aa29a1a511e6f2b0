//! SQLite repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries. The schema lives in `migrations/` and is embedded in the binary
//! through [`MIGRATOR`].
//!
//! # Repositories
//!
//! - [`SqliteUserRepository`] - User accounts and profiles
//! - [`SqliteAnalysisRepository`] - Saved analyses and their segments

pub mod sqlite_analysis_repository;
pub mod sqlite_user_repository;

pub use sqlite_analysis_repository::SqliteAnalysisRepository;
pub use sqlite_user_repository::SqliteUserRepository;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Opens a connection pool with foreign keys enforced.
///
/// # Errors
///
/// Returns an error if the URL is invalid or the database cannot be opened.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
}
