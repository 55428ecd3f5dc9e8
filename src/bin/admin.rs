//! CLI administration tool for tinylink.
//!
//! Talks to the same SQLite store as the server, without going through HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com
//!
//! # Look up a token
//! cargo run --bin admin -- resolve 1b4e28ba
//!
//! # Check database health and pool counters
//! cargo run --bin admin -- health
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; `DATABASE_URL` (or `DB_URL`) is required.

use tinylink::config;
use tinylink::prelude::*;
use tinylink::server::open_store;
use tinylink::state::SqliteLinkService;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing tinylink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Store a URL and print its token
    Shorten {
        /// URL to shorten (stored verbatim)
        url: String,
    },

    /// Print the URL stored for a token
    Resolve {
        /// Short token
        token: String,
    },

    /// Check database connection and pool counters
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;
    let service = open_store(&config).await?;

    let outcome = match cli.command {
        Commands::Shorten { url } => shorten(&service, url).await,
        Commands::Resolve { token } => resolve(&service, &token).await,
        Commands::Health => {
            health(&service).await;
            Ok(())
        }
    };

    service.close().await;
    outcome
}

async fn shorten(service: &SqliteLinkService, url: String) -> Result<()> {
    let created = service.create_short_url(url).await?;

    println!("{}", "Short URL created".green().bold());
    println!("  Token:    {}", created.short_url.bright_yellow().bold());
    println!("  Target:   {}", created.original_url.cyan());
    println!("  ID:       {}", created.id.to_string().bright_black());
    println!(
        "  Created:  {}",
        created
            .created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .bright_black()
    );

    Ok(())
}

async fn resolve(service: &SqliteLinkService, token: &str) -> Result<()> {
    match service.resolve(token).await {
        Ok(url) => {
            println!("{} -> {}", token.bright_yellow(), url.cyan());
            Ok(())
        }
        Err(e) if e.is_not_found() => {
            println!("{}", format!("No URL stored for '{}'", token).yellow());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Prints the health verdict.
///
/// ```text
/// Database: UP
///   It's healthy
///   open=1 in_use=0 idle=1 wait_count=0 wait_duration=0ns idle_closed=0 lifetime_closed=0
/// ```
async fn health(service: &SqliteLinkService) {
    match service.health().await {
        DatabaseHealth::Up { stats, message } => {
            println!("Database: {}", "UP".green().bold());
            println!("  {}", message);
            println!(
                "  open={} in_use={} idle={} wait_count={} wait_duration={:?} idle_closed={} lifetime_closed={}",
                stats.open_connections,
                stats.in_use,
                stats.idle,
                stats.wait_count,
                stats.wait_duration,
                stats.max_idle_closed,
                stats.max_lifetime_closed
            );
        }
        DatabaseHealth::Down { error } => {
            println!("Database: {}", "DOWN".red().bold());
            println!("  {}", error.red());
        }
    }
}
