//! CLI administration tool for url-shortener.
//!
//! Inspects the mapping store without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Show a single mapping
//! cargo run --bin admin -- show 3f2a9c1e
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server; `DATABASE_URL` selects the
//! SQLite file (default `sqlite://urls.db?mode=rwc`).

use url_shortener::config;
use url_shortener::domain::repositories::MappingRepository;
use url_shortener::infrastructure::persistence::{SqliteMappingRepository, connect};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::SqlitePool;
use std::sync::Arc;

/// CLI tool for managing url-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show statistics
    Stats,

    /// Show a mapping by short id
    Show {
        /// Short id (the path segment of a short URL)
        id: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
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

    let config = config::load_from_env()?;
    let pool = connect(&config)
        .await
        .context("Failed to connect to database")?;
    let repo = SqliteMappingRepository::new(Arc::new(pool.clone()));

    match cli.command {
        Commands::Stats => handle_stats(&repo).await?,
        Commands::Show { id } => handle_show(&repo, &id).await?,
        Commands::Db { action } => handle_db_action(action, &repo, &pool).await?,
    }

    pool.close().await;

    Ok(())
}

/// Displays mapping counts.
async fn handle_stats(repo: &SqliteMappingRepository) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let total = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count mappings: {}", e))?;
    let expired = repo
        .count_expired(Utc::now())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count expired mappings: {}", e))?;

    println!("  Mappings: {}", total.to_string().bright_green().bold());
    println!(
        "  Active:   {}",
        (total - expired).to_string().bright_green().bold()
    );
    println!("  Expired:  {}", expired.to_string().yellow().bold());
    println!();

    Ok(())
}

/// Prints one mapping with its expiry status.
async fn handle_show(repo: &SqliteMappingRepository, id: &str) -> Result<()> {
    let mapping = repo
        .find_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("No mapping for '{id}'"))?;

    let status = if mapping.is_expired() {
        "EXPIRED".red()
    } else {
        "ACTIVE".green()
    };

    println!("  Id:      {}", mapping.id.cyan());
    println!("  URL:     {}", mapping.original_url.bright_white());
    println!(
        "  Expires: {}",
        mapping
            .expiration_date
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!("  Status:  {status}");

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(
    action: DbAction,
    repo: &SqliteMappingRepository,
    pool: &SqlitePool,
) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            repo.ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database unreachable: {}", e))?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;

            println!("  SQLite: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
