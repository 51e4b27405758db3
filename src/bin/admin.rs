//! CLI administration tool for atomzr.
//!
//! Manages API keys and performs database checks without requiring HTTP API
//! access.
//!
//! # Usage
//!
//! ```bash
//! # Create a new API key
//! cargo run --bin admin -- key create --label "Production"
//!
//! # List all keys
//! cargo run --bin admin -- key list
//!
//! # Revoke a key
//! cargo run --bin admin -- key revoke 3
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET` (required): must match the server's value, so
//!   minted keys verify at request time

use atomzr::application::services::AuthService;
use atomzr::domain::repositories::ApiKeyRepository;
use atomzr::infrastructure::persistence::PgApiKeyRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing atomzr.
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
    /// Manage API keys
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// API key management subcommands.
#[derive(Subcommand)]
enum KeyAction {
    /// Create a new API key
    Create {
        /// Key label (e.g., "Production", "Mobile App")
        #[arg(short, long)]
        label: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all keys
    List,

    /// Revoke a key by id
    Revoke {
        id: i64,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let signing_secret =
        std::env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Key { action } => handle_key_action(action, &pool, signing_secret).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches key management commands.
async fn handle_key_action(action: KeyAction, pool: &PgPool, signing_secret: String) -> Result<()> {
    let repo = Arc::new(PgApiKeyRepository::new(Arc::new(pool.clone())));
    let auth = AuthService::new(repo.clone(), signing_secret);

    match action {
        KeyAction::Create { label, yes } => {
            create_key(repo, &auth, label, yes).await?;
        }
        KeyAction::List => {
            list_keys(repo).await?;
        }
        KeyAction::Revoke { id } => {
            revoke_key(repo, id).await?;
        }
    }

    Ok(())
}

/// Creates a new API key with interactive prompts.
///
/// Only the HMAC of the token is stored; the raw token is displayed once
/// and cannot be retrieved later.
async fn create_key(
    repo: Arc<PgApiKeyRepository>,
    auth: &AuthService<PgApiKeyRepository>,
    label: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Create API key".bright_blue().bold());
    println!();

    let label = match label {
        Some(l) => l,
        None => Input::new()
            .with_prompt("Key label")
            .with_initial_text("Production")
            .interact_text()?,
    };

    let token = generate_token();

    println!("  Label: {}", label.cyan());
    println!("  Token: {}", token.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "Save this token now, it cannot be shown again.".red().bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this key?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let token_hash = auth.hash_token(&token);

    let key = repo
        .create_key(&label, &token_hash)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create key: {e}"))?;

    println!();
    println!("{}", "Key created".green().bold());
    println!();
    println!("  Id: {}", key.id.to_string().bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        token.bright_yellow()
    );
    println!();
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/links",
        token.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all API keys with status indicators.
async fn list_keys(repo: Arc<PgApiKeyRepository>) -> Result<()> {
    println!("{}", "API keys".bright_blue().bold());
    println!();

    let keys = repo
        .list_keys()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list keys: {e}"))?;

    if keys.is_empty() {
        println!("{}", "  No keys found".yellow());
        println!(
            "  Create one with: {} admin key create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<30} {:<18} {:<10}",
        "Id".bright_white().bold(),
        "Label".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "-".repeat(66).bright_black());

    for key in &keys {
        let status = if key.is_revoked() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<4} {:<30} {:<18} {}",
            key.id.to_string().bright_black(),
            key.label.cyan(),
            key.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!("  Total: {}", keys.len().to_string().bright_white().bold());

    Ok(())
}

/// Revokes a key by id with a confirmation prompt.
async fn revoke_key(repo: Arc<PgApiKeyRepository>, id: i64) -> Result<()> {
    println!("{}", "Revoke API key".bright_blue().bold());
    println!();

    let confirmed = Confirm::new()
        .with_prompt(format!("Revoke key {id}?"))
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "Cancelled".red());
        return Ok(());
    }

    let revoked = repo
        .revoke_key(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke key: {e}"))?;

    if revoked {
        println!("{}", "Key revoked".green().bold());
    } else {
        println!("{}", "No active key with that id".yellow());
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
    }

    Ok(())
}

/// Generates a cryptographically random token.
///
/// 48 alphanumeric characters, ~286 bits of entropy.
fn generate_token() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const TOKEN_LEN: usize = 48;

    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
