//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, the model client and the Axum
//! server lifecycle.

use crate::config::Config;
use crate::domain::model::GenerativeModel;
use crate::infrastructure::llm::{GeminiClient, GeminiSettings};
use crate::infrastructure::persistence::{self, MIGRATOR};
use crate::routes::app_router;
use crate::state::{AppState, SessionSettings};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool
/// - Apply migrations
/// - Gemini client
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Model client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = persistence::connect(&config.database_url, config.db_max_connections)
        .await
        .context("Failed to open database")?;
    tracing::info!("Connected to database");

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let model: Arc<dyn GenerativeModel> = Arc::new(
        GeminiClient::new(GeminiSettings {
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            base_url: config.gemini_base_url.clone(),
            timeout: Duration::from_secs(config.llm_timeout_seconds),
        })
        .context("Failed to build model client")?,
    );
    tracing::info!(model = %config.gemini_model, "Model client ready");

    let session_ttl = chrono::Duration::try_minutes(config.session_ttl_minutes)
        .context("SESSION_TTL_MINUTES is out of range")?;

    let state = AppState::new(
        Arc::new(pool.clone()),
        model,
        SessionSettings {
            secret: config.session_secret.clone(),
            ttl: session_ttl,
            cookie_secure: config.cookie_secure,
        },
        config.response_language.clone(),
    );

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
