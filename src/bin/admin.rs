//! CLI administration tool for link-gate.
//!
//! Provides commands for issuing API keys, inspecting accounts and checking
//! the database without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Issue a new API key for account 42 (replaces any previous key)
//! cargo run --bin admin -- key issue 42
//!
//! # Show account 42, including inactive accounts
//! cargo run --bin admin -- user show 42
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*` components),
//! `API_KEY_SIGNING_SECRET` and `API_KEY_LENGTH`. The admin tool only works
//! with the PostgreSQL backend.

use link_gate::config::{self, Config, StorageBackend};
use link_gate::domain::entities::IdentityRecord;
use link_gate::domain::quota::QuotaLimit;
use link_gate::domain::repositories::IdentityRepository;
use link_gate::infrastructure::persistence::PgIdentityRepository;
use link_gate::utils::api_key::{generate_api_key, hash_api_key};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-gate.
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

    /// Inspect accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// API key subcommands.
#[derive(Subcommand)]
enum KeyAction {
    /// Generate a new API key for an account and enable its API access
    Issue {
        /// Account id
        user_id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Account subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Show an account, active or not
    Show {
        /// Account id
        user_id: i64,
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

    let config = config::load_from_env()?;
    if config.storage_backend != StorageBackend::Postgres {
        anyhow::bail!("The admin tool requires STORAGE_BACKEND=postgres");
    }

    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Key { action } => handle_key_action(action, &config, &pool).await?,
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches API key commands.
async fn handle_key_action(action: KeyAction, config: &Config, pool: &PgPool) -> Result<()> {
    let repo = PgIdentityRepository::new(Arc::new(pool.clone()));

    match action {
        KeyAction::Issue { user_id, yes } => issue_key(&repo, config, user_id, yes).await?,
    }

    Ok(())
}

/// Issues a new API key with a confirmation prompt.
///
/// # Flow
///
/// 1. Look up the account (inactive accounts included)
/// 2. Confirm replacement of any existing key (unless `--yes`)
/// 3. Generate an `API_KEY_LENGTH` alphanumeric key
/// 4. Store its HMAC-SHA256 hash and enable API access
/// 5. Print the key once
///
/// Only the hash is stored; the key cannot be retrieved later.
async fn issue_key(
    repo: &PgIdentityRepository,
    config: &Config,
    user_id: i64,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Issue API Key".bright_blue().bold());
    println!();

    let record = repo
        .find_by_id(user_id, true)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("Account {user_id} not found"))?;

    print_record(&record);

    if !record.active {
        println!(
            "{}",
            "⚠️  This account is inactive; the key will not work until it is reactivated"
                .yellow()
        );
        println!();
    }

    if !skip_confirm {
        let prompt = if record.api_key_hash.is_some() {
            "Replace the existing key of this account?"
        } else {
            "Issue a key for this account?"
        };

        let confirmed = Confirm::new()
            .with_prompt(prompt)
            .default(record.api_key_hash.is_none())
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let key = generate_api_key(config.api_key_length);
    let key_hash = hash_api_key(&config.api_key_signing_secret, &key);

    let updated = repo
        .set_api_key(record.id, &key_hash)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to store key: {}", e))?;

    if !updated {
        anyhow::bail!("Account {} disappeared before the key was stored", record.id);
    }

    println!();
    println!("{}", "✅ Key issued successfully!".green().bold());
    println!();
    println!("  Key: {}", key.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this key now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();
    println!("{}", "Add this to your requests:".bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        key.bright_yellow()
    );
    println!();

    Ok(())
}

/// Dispatches account commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = PgIdentityRepository::new(Arc::new(pool.clone()));

    match action {
        UserAction::Show { user_id } => {
            println!("{}", "👤 Account".bright_blue().bold());
            println!();

            let record = repo
                .find_by_id(user_id, true)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
                .with_context(|| format!("Account {user_id} not found"))?;

            print_record(&record);
        }
    }

    Ok(())
}

fn print_record(record: &IdentityRecord) {
    let flag = |on: bool| if on { "yes".green() } else { "no".red() };

    let quota = match record.api_quota.map(QuotaLimit::from_raw) {
        None => "default".bright_black(),
        Some(QuotaLimit::Unlimited) => "unlimited".cyan(),
        Some(QuotaLimit::PerWindow(max)) => format!("{max} / window").cyan(),
    };

    println!("  ID:         {}", record.id.to_string().bright_black());
    println!("  Username:   {}", record.username.cyan());
    println!("  Role:       {}", record.role.as_str().bright_white());
    println!("  Active:     {}", flag(record.active));
    println!("  API access: {}", flag(record.api_active));
    println!("  Key set:    {}", flag(record.api_key_hash.is_some()));
    println!("  Quota:      {}", quota);
    println!();
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}
