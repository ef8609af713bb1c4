//! Account commands
//!
//! Registration, login, password change and bulk credential import.

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use sentinel_core::auth::{
    self, ChangePasswordRequest, LoginRequest, RegisterRequest, SqliteUserRepository,
};
use sentinel_core::models::Role;
use sentinel_core::services::import;

use super::Context;
use crate::output::{print_info, print_single, print_success};

#[derive(Subcommand)]
pub enum AccountAction {
    /// Create a new account
    Register {
        /// Username (at least 3 characters, case-sensitive)
        #[arg(long)]
        username: String,

        /// Password (at least 8 characters)
        #[arg(long)]
        password: String,

        /// Password confirmation
        #[arg(long)]
        confirm: String,

        /// Account role: user, analyst or admin
        #[arg(long, default_value = "user")]
        role: Role,
    },

    /// Verify credentials and show the session identity
    Login {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,
    },

    /// Change the password for an account
    Passwd {
        #[arg(long)]
        username: String,

        /// Current password (re-verified before the change)
        #[arg(long)]
        current: String,

        /// New password (at least 8 characters)
        #[arg(long)]
        new: String,
    },

    /// Seed accounts from a username,password_hash[,role] file
    Import {
        /// Path to the seed file
        file: PathBuf,
    },
}

/// Session row for display after login
#[derive(Debug, Serialize, Tabled)]
pub struct SessionRow {
    #[tabled(rename = "Username")]
    pub username: String,
    #[tabled(rename = "Role")]
    pub role: String,
}

pub async fn execute(ctx: &Context, action: AccountAction) -> Result<()> {
    match action {
        AccountAction::Register {
            username,
            password,
            confirm,
            role,
        } => register(ctx, username, password, confirm, role).await,
        AccountAction::Login { username, password } => login(ctx, username, password).await,
        AccountAction::Passwd {
            username,
            current,
            new,
        } => passwd(ctx, username, current, new).await,
        AccountAction::Import { file } => import_file(ctx, file).await,
    }
}

async fn register(
    ctx: &Context,
    username: String,
    password: String,
    confirm: String,
    role: Role,
) -> Result<()> {
    let repo = SqliteUserRepository::new(&ctx.db.pool);

    let user = auth::register(
        &repo,
        RegisterRequest {
            username,
            password,
            confirm_password: confirm,
            role,
        },
    )
    .await?;

    print_success(
        &format!("Account '{}' created with role '{}'", user.username, user.role),
        ctx.quiet,
    );
    Ok(())
}

async fn login(ctx: &Context, username: String, password: String) -> Result<()> {
    let repo = SqliteUserRepository::new(&ctx.db.pool);

    let session = auth::login(&repo, LoginRequest { username, password }).await?;

    print_success("Login successful", ctx.quiet);
    print_single(
        &SessionRow {
            username: session.username().to_string(),
            role: session.role().to_string(),
        },
        ctx.format,
    )?;
    Ok(())
}

async fn passwd(ctx: &Context, username: String, current: String, new: String) -> Result<()> {
    let repo = SqliteUserRepository::new(&ctx.db.pool);

    auth::change_password(
        &repo,
        ChangePasswordRequest {
            username,
            current_password: current,
            new_password: new,
        },
    )
    .await?;

    print_success("Password updated", ctx.quiet);
    Ok(())
}

async fn import_file(ctx: &Context, file: PathBuf) -> Result<()> {
    let repo = SqliteUserRepository::new(&ctx.db.pool);

    print_info(&format!("Importing accounts from {}", file.display()), ctx.quiet);
    let summary = import::import_credentials_file(&repo, &file).await?;

    print_success(
        &format!(
            "Import finished: {} imported, {} skipped",
            summary.imported, summary.skipped
        ),
        ctx.quiet,
    );
    Ok(())
}
