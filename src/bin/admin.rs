//! CLI administration tool for MarketWise.
//!
//! Provides commands for managing dashboard accounts, inspecting saved
//! analyses and performing database checks without going through the web UI.
//!
//! # Usage
//!
//! ```bash
//! # Create an account (prompts for missing values)
//! cargo run --bin marketwise-admin -- user create --email ana@example.com
//!
//! # List accounts
//! cargo run --bin marketwise-admin -- user list
//!
//! # List saved analyses, then show one
//! cargo run --bin marketwise-admin -- analyses list
//! cargo run --bin marketwise-admin -- analyses show 3
//!
//! # Check database connection
//! cargo run --bin marketwise-admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (optional): SQLite URL, defaults to `sqlite://marketwise.db?mode=rwc`

use marketwise::config::DEFAULT_DATABASE_URL;
use marketwise::domain::entities::NewUser;
use marketwise::domain::repositories::{AnalysisRepository, UserRepository};
use marketwise::infrastructure::persistence::{
    self, MIGRATOR, SqliteAnalysisRepository, SqliteUserRepository,
};
use marketwise::utils::password::{generate_password, hash_password};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::SqlitePool;
use std::sync::Arc;

const GENERATED_PASSWORD_LEN: usize = 16;

/// CLI tool for managing MarketWise.
#[derive(Parser)]
#[command(name = "marketwise-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage dashboard accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Inspect saved analyses
    Analyses {
        #[command(subcommand)]
        action: AnalysesAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new account
    Create {
        /// Account email
        #[arg(short, long)]
        email: Option<String>,

        /// Display name
        #[arg(short, long)]
        name: Option<String>,

        /// Generate a random password instead of prompting
        #[arg(short, long)]
        generate: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all accounts
    List,
}

#[derive(Subcommand)]
enum AnalysesAction {
    /// List saved analyses, newest first
    List,

    /// Show the segments of one analysis
    Show {
        /// Analysis ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    let pool = persistence::connect(&database_url, 1)
        .await
        .context("Failed to connect to database")?;
    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Analyses { action } => handle_analyses_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_user_action(action: UserAction, pool: &SqlitePool) -> Result<()> {
    let repo = Arc::new(SqliteUserRepository::new(Arc::new(pool.clone())));

    match action {
        UserAction::Create {
            email,
            name,
            generate,
            yes,
        } => create_user(repo, email, name, generate, yes).await?,
        UserAction::List => list_users(repo).await?,
    }

    Ok(())
}

/// Creates an account with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for email (or use provided)
/// 2. Prompt for password, or generate one with `--generate`
/// 3. Confirm creation (unless `--yes` flag)
/// 4. Hash password with Argon2 and store the account
///
/// A generated password is displayed once and cannot be retrieved later.
async fn create_user(
    repo: Arc<SqliteUserRepository>,
    email: Option<String>,
    name: Option<String>,
    generate: bool,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create Account".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let email = email.trim().to_lowercase();
    anyhow::ensure!(
        validator::ValidateEmail::validate_email(&email),
        "Invalid email address: {email}"
    );

    let password = if generate {
        let generated = generate_password(GENERATED_PASSWORD_LEN);
        println!("{}", "✨ Generated new password".green());
        generated
    } else {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.chars().count() >= 6 {
                    Ok(())
                } else {
                    Err("Use at least 6 characters")
                }
            })
            .interact()?
    };

    println!();
    println!("{}", "Account details:".bright_white().bold());
    println!("  Email: {}", email.cyan());
    if let Some(name) = &name {
        println!("  Name:  {}", name.cyan());
    }
    if generate {
        println!("  Password: {}", password.bright_yellow().bold());
        println!();
        println!(
            "{}",
            "⚠️  IMPORTANT: Save this password now! You won't be able to see it again."
                .red()
                .bold()
        );
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this account?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let user = repo
        .create(NewUser {
            email,
            name: name.filter(|n| !n.trim().is_empty()),
            hashed_password: hash_password(&password)
                .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create account: {}", e))?;

    println!();
    println!(
        "{} (ID {})",
        "✅ Account created successfully!".green().bold(),
        user.id.to_string().bright_white()
    );
    println!();

    Ok(())
}

/// Lists all accounts.
///
/// # Output Format
///
/// ```text
/// 📋 Accounts
///
///   ID  Email                          Name                 Created
///   ──────────────────────────────────────────────────────────────────────
///   1   ana@example.com                Ana                  2025-01-15 10:30
/// ```
async fn list_users(repo: Arc<SqliteUserRepository>) -> Result<()> {
    println!("{}", "📋 Accounts".bright_blue().bold());
    println!();

    let users = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list accounts: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No accounts found".yellow());
        println!();
        println!(
            "  Create one with: {} marketwise-admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<30} {:<20} {:<16}",
        "ID".bright_white().bold(),
        "Email".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(72).bright_black());

    for account in &users {
        println!(
            "  {:<3} {:<30} {:<20} {}",
            account.user.id.to_string().bright_black(),
            account.user.email.cyan(),
            account.user.name.as_deref().unwrap_or("-"),
            account
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn handle_analyses_action(action: AnalysesAction, pool: &SqlitePool) -> Result<()> {
    let repo = SqliteAnalysisRepository::new(Arc::new(pool.clone()));

    match action {
        AnalysesAction::List => {
            println!("{}", "📊 Saved Analyses".bright_blue().bold());
            println!();

            let analyses = repo
                .list()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list analyses: {}", e))?;

            if analyses.is_empty() {
                println!("{}", "  No saved analyses".yellow());
                return Ok(());
            }

            println!(
                "  {:<4} {:<17} {:<9} {}",
                "ID".bright_white().bold(),
                "Created".bright_white().bold(),
                "Clusters".bright_white().bold(),
                "Data".bright_white().bold()
            );
            println!("  {}", "─".repeat(72).bright_black());

            for analysis in &analyses {
                println!(
                    "  {:<4} {:<17} {:<9} {}",
                    analysis.id.to_string().bright_black(),
                    analysis.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                    analysis.number_of_clusters,
                    analysis.original_data_snippet.replace('\n', " ").bright_black()
                );
            }

            println!();
            println!(
                "  Total: {}",
                analyses.len().to_string().bright_white().bold()
            );
            println!();
        }
        AnalysesAction::Show { id } => {
            let insights = repo
                .find_by_id(id)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
                .context("Analysis not found")?;

            println!("{}", format!("📊 Analysis #{id}").bright_blue().bold());
            println!();
            println!("{}", insights.textual_insights);
            println!();

            for segment in &insights.segments {
                println!(
                    "  {} {}",
                    segment.name.cyan().bold(),
                    format!(
                        "({} customers, avg {:.2}, freq {:.2})",
                        segment.size, segment.avg_purchase_value, segment.purchase_frequency
                    )
                    .bright_black()
                );
                println!("    {}", segment.description);
            }

            println!();
            println!(
                "  Total customers: {}",
                insights
                    .total_customers()
                    .to_string()
                    .bright_white()
                    .bold()
            );
            println!();
        }
    }

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &SqlitePool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;

            let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
                .fetch_one(pool)
                .await?;
            let analyses: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM analyses")
                .fetch_one(pool)
                .await?;
            let segments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM segments")
                .fetch_one(pool)
                .await?;

            println!("  SQLite:    {}", version.bright_white());
            println!("  Accounts:  {}", users.to_string().bright_green().bold());
            println!("  Analyses:  {}", analyses.to_string().bright_green().bold());
            println!("  Segments:  {}", segments.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
