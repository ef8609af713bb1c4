//! Sentinel CLI - account management and incident tracking
//!
//! The command-line surface over the Sentinel credential store: account
//! registration, login, password changes, bulk credential import, and the
//! session-guarded incident screens.

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sentinel")]
#[command(author, version, about = "Intelligence platform account and incident CLI", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: table (default) or json
    #[arg(long, global = true, default_value = "table")]
    format: output::OutputFormat,

    /// Suppress progress messages
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Override database path (or set SENTINEL_DB_PATH env var)
    #[arg(long, env = "SENTINEL_DB_PATH", global = true)]
    db: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage accounts: register, login, change password, import
    Account {
        #[command(subcommand)]
        action: commands::account::AccountAction,
    },

    /// Track security incidents (requires login)
    Incident {
        #[command(subcommand)]
        action: commands::incident::IncidentAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // Set up database path if provided
    if let Some(db_path) = &cli.db {
        std::env::set_var("SENTINEL_DB_PATH", db_path);
    }

    // Initialize database
    let db = sentinel_core::Database::new().await?;

    // Create context for commands
    let ctx = commands::Context {
        db,
        format: cli.format,
        quiet: cli.quiet,
    };

    // Execute command
    match cli.command {
        Commands::Account { action } => commands::account::execute(&ctx, action).await,
        Commands::Incident { action } => commands::incident::execute(&ctx, action).await,
    }
}
