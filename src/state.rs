//! Shared application state injected into every handler.

use chrono::Duration;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::application::services::{AuthService, SegmentationService, StrategyService};
use crate::domain::model::GenerativeModel;
use crate::infrastructure::cache::{AnalysisCache, MemoryAnalysisCache};
use crate::infrastructure::persistence::{SqliteAnalysisRepository, SqliteUserRepository};
use crate::utils::session_token::SessionTokens;

/// Session settings shared by the API and the web pages.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub secret: String,
    pub ttl: Duration,
    /// Adds `Secure` to the session cookie.
    pub cookie_secure: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<SqliteUserRepository>>,
    pub segmentation_service: Arc<SegmentationService<SqliteAnalysisRepository>>,
    pub strategy_service: Arc<StrategyService>,
    pub analysis_cache: Arc<dyn AnalysisCache>,
    pub model: Arc<dyn GenerativeModel>,
    pub cookie_secure: bool,
}

impl AppState {
    /// Wires repositories and services over one pool and one model client.
    pub fn new(
        pool: Arc<SqlitePool>,
        model: Arc<dyn GenerativeModel>,
        session: SessionSettings,
        response_language: String,
    ) -> Self {
        let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
        let analysis_repository = Arc::new(SqliteAnalysisRepository::new(pool));

        let tokens = SessionTokens::new(session.secret.as_bytes(), session.ttl);

        Self {
            auth_service: Arc::new(AuthService::new(user_repository, tokens)),
            segmentation_service: Arc::new(SegmentationService::new(
                analysis_repository,
                model.clone(),
                response_language.clone(),
            )),
            strategy_service: Arc::new(StrategyService::new(model.clone(), response_language)),
            analysis_cache: Arc::new(MemoryAnalysisCache::new()),
            model,
            cookie_secure: session.cookie_secure,
        }
    }

    /// Session cookie lifetime in seconds.
    pub fn session_max_age(&self) -> i64 {
        self.auth_service.tokens().ttl().num_seconds()
    }
}
