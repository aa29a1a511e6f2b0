//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Example
//!
//! ```bash
//! export DATABASE_URL="sqlite://marketwise.db?mode=rwc"
//! export SESSION_SECRET="change-me"
//! export GEMINI_API_KEY="..."
//! ```
//!
//! ## Required Variables
//!
//! - `SESSION_SECRET` - HMAC key for session tokens
//! - `GEMINI_API_KEY` (or `GOOGLE_API_KEY`) - Generative model API key
//!
//! ## Optional Variables
//!
//! - `DATABASE_URL` - SQLite URL (default: `sqlite://marketwise.db?mode=rwc`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BEHIND_PROXY` - Trust forwarded client IP headers (default: `false`)
//! - `SESSION_TTL_MINUTES` - Session lifetime, at most one year (default: 10080, seven days)
//! - `COOKIE_SECURE` - Mark the session cookie `Secure` (default: `false`)
//! - `GEMINI_MODEL` - Model name (default: `gemini-pro-latest`)
//! - `GEMINI_BASE_URL` - API root (default: `https://generativelanguage.googleapis.com/v1beta`)
//! - `LLM_TIMEOUT_SECONDS` - Model request timeout (default: 60)
//! - `RESPONSE_LANGUAGE` - Language the model answers in (default: `Brazilian Portuguese`)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://marketwise.db?mode=rwc";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro-latest";
pub const DEFAULT_RESPONSE_LANGUAGE: &str = "Brazilian Portuguese";
/// Longest accepted session lifetime: one year.
pub const MAX_SESSION_TTL_MINUTES: i64 = 60 * 24 * 365;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    /// HMAC secret for session tokens. Loaded from `SESSION_SECRET`. Must be non-empty.
    pub session_secret: String,
    pub session_ttl_minutes: i64,
    /// Adds the `Secure` attribute to the session cookie. Enable behind HTTPS.
    pub cookie_secure: bool,

    // ── Generative model ────────────────────────────────────────────────────
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub llm_timeout_seconds: u64,
    /// Language every model answer is written in.
    pub response_language: String,

    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 5).
    pub db_max_connections: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `SESSION_SECRET` or the model API key is missing.
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let behind_proxy = env_flag("BEHIND_PROXY");
        let cookie_secure = env_flag("COOKIE_SECURE");

        let session_secret = env::var("SESSION_SECRET").context("SESSION_SECRET must be set")?;

        let session_ttl_minutes = env::var("SESSION_TTL_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60 * 24 * 7);

        let gemini_api_key = Self::load_api_key()?;

        let gemini_model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());
        let gemini_base_url =
            env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string());

        let llm_timeout_seconds = env::var("LLM_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let response_language = env::var("RESPONSE_LANGUAGE")
            .unwrap_or_else(|_| DEFAULT_RESPONSE_LANGUAGE.to_string());

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            database_url,
            listen_addr,
            log_level,
            log_format,
            behind_proxy,
            session_secret,
            session_ttl_minutes,
            cookie_secure,
            gemini_api_key,
            gemini_model,
            gemini_base_url,
            llm_timeout_seconds,
            response_language,
            db_max_connections,
        })
    }

    /// Loads the model API key.
    ///
    /// Priority:
    /// 1. `GEMINI_API_KEY`
    /// 2. `GOOGLE_API_KEY`
    fn load_api_key() -> Result<String> {
        env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("GOOGLE_API_KEY"))
            .context("GEMINI_API_KEY (or GOOGLE_API_KEY) must be set")
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `database_url` is not a SQLite URL
    /// - `gemini_base_url` is not an http(s) URL
    /// - a secret is empty or a numeric setting is zero
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        match url::Url::parse(&self.gemini_base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => anyhow::bail!(
                "GEMINI_BASE_URL must be an http(s) URL, got '{}'",
                self.gemini_base_url
            ),
        }

        if self.session_secret.is_empty() {
            anyhow::bail!("SESSION_SECRET must not be empty");
        }

        if self.session_ttl_minutes <= 0 || self.session_ttl_minutes > MAX_SESSION_TTL_MINUTES {
            anyhow::bail!(
                "SESSION_TTL_MINUTES must be between 1 and {MAX_SESSION_TTL_MINUTES}, got {}",
                self.session_ttl_minutes
            );
        }

        if self.gemini_api_key.is_empty() {
            anyhow::bail!("GEMINI_API_KEY must not be empty");
        }

        if self.llm_timeout_seconds == 0 {
            anyhow::bail!("LLM_TIMEOUT_SECONDS must be greater than 0");
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        Ok(())
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Behind proxy: {}", self.behind_proxy);
        tracing::info!("  Session TTL: {} min", self.session_ttl_minutes);
        tracing::info!("  Session secret: {}", mask_secret(&self.session_secret));
        tracing::info!("  Model: {} ({})", self.gemini_model, self.gemini_base_url);
        tracing::info!("  Model API key: {}", mask_secret(&self.gemini_api_key));
        tracing::info!("  Response language: {}", self.response_language);
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
}

/// Masks a secret for logging, keeping at most its first four characters.
///
/// - `AIzaSyD-long-key` → `AIza***`
/// - `abc` → `***`
fn mask_secret(secret: &str) -> String {
    if secret.chars().count() <= 8 {
        return "***".to_string();
    }
    let head: String = secret.chars().take(4).collect();
    format!("{head}***")
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
