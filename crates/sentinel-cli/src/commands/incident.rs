//! Incident commands
//!
//! Session-guarded screens over the incident store. Every action first
//! establishes a session from the supplied credentials and passes it through
//! the guard before touching incident data.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use sentinel_core::auth::{self, require_authenticated, CurrentUser, LoginRequest, SqliteUserRepository};
use sentinel_core::services::incidents::{IncidentStore, NewIncident};

use super::Context;
use crate::output::{print_output, print_success};

/// Credentials used to establish the session for a protected command
#[derive(Args)]
pub struct Credentials {
    #[arg(long, env = "SENTINEL_USER")]
    pub username: String,

    #[arg(long, env = "SENTINEL_PASSWORD")]
    pub password: String,
}

#[derive(Subcommand)]
pub enum IncidentAction {
    /// List incidents, optionally filtered by severity
    List {
        #[command(flatten)]
        credentials: Credentials,

        /// Only show incidents with this severity
        #[arg(long)]
        severity: Option<String>,
    },

    /// Report a new incident
    Add {
        #[command(flatten)]
        credentials: Credentials,

        #[arg(long)]
        severity: String,

        #[arg(long)]
        category: String,

        #[arg(long)]
        description: String,
    },

    /// Update the status of an incident
    Status {
        #[command(flatten)]
        credentials: Credentials,

        /// Incident id
        id: String,

        /// New status, e.g. Open, Investigating, Resolved
        status: String,
    },

    /// Delete an incident
    Delete {
        #[command(flatten)]
        credentials: Credentials,

        /// Incident id
        id: String,
    },

    /// Incident counts per category
    Stats {
        #[command(flatten)]
        credentials: Credentials,
    },
}

/// Incident row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct IncidentRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Time")]
    pub timestamp: String,
    #[tabled(rename = "Severity")]
    pub severity: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Reported by")]
    pub reported_by: String,
    #[tabled(rename = "Description")]
    pub description: String,
}

impl From<sentinel_core::Incident> for IncidentRow {
    fn from(incident: sentinel_core::Incident) -> Self {
        Self {
            id: incident.id,
            timestamp: incident.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            severity: incident.severity,
            category: incident.category,
            status: incident.status,
            reported_by: incident.reported_by,
            description: incident.description,
        }
    }
}

/// Category count row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct StatsRow {
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Incidents")]
    pub count: i64,
}

pub async fn execute(ctx: &Context, action: IncidentAction) -> Result<()> {
    match action {
        IncidentAction::List {
            credentials,
            severity,
        } => {
            let current = authenticate(ctx, &credentials).await?;
            list(ctx, &current, severity).await
        }
        IncidentAction::Add {
            credentials,
            severity,
            category,
            description,
        } => {
            let current = authenticate(ctx, &credentials).await?;
            add(ctx, &current, severity, category, description).await
        }
        IncidentAction::Status {
            credentials,
            id,
            status,
        } => {
            let current = authenticate(ctx, &credentials).await?;
            update_status(ctx, &current, id, status).await
        }
        IncidentAction::Delete { credentials, id } => {
            let current = authenticate(ctx, &credentials).await?;
            delete(ctx, &current, id).await
        }
        IncidentAction::Stats { credentials } => {
            let current = authenticate(ctx, &credentials).await?;
            stats(ctx, &current).await
        }
    }
}

/// Establish a session and pass it through the guard
///
/// Runs before any protected computation; a failed login or an anonymous
/// session never reaches the incident store.
async fn authenticate(ctx: &Context, credentials: &Credentials) -> Result<CurrentUser> {
    let repo = SqliteUserRepository::new(&ctx.db.pool);
    let session = auth::login(
        &repo,
        LoginRequest {
            username: credentials.username.clone(),
            password: credentials.password.clone(),
        },
    )
    .await?;
    Ok(require_authenticated(&session)?)
}

async fn list(ctx: &Context, _current: &CurrentUser, severity: Option<String>) -> Result<()> {
    let store = IncidentStore::new(&ctx.db.pool);

    let incidents = match severity {
        Some(severity) => store.list_by_severity(&severity).await?,
        None => store.list().await?,
    };

    let rows: Vec<IncidentRow> = incidents.into_iter().map(IncidentRow::from).collect();
    print_output(&rows, ctx.format)?;
    Ok(())
}

async fn add(
    ctx: &Context,
    current: &CurrentUser,
    severity: String,
    category: String,
    description: String,
) -> Result<()> {
    let store = IncidentStore::new(&ctx.db.pool);

    let incident = store
        .report(
            current,
            NewIncident {
                severity,
                category,
                description,
            },
        )
        .await?;

    print_success(&format!("Incident {} reported", incident.id), ctx.quiet);
    Ok(())
}

async fn update_status(
    ctx: &Context,
    _current: &CurrentUser,
    id: String,
    status: String,
) -> Result<()> {
    let store = IncidentStore::new(&ctx.db.pool);

    if !store.update_status(&id, &status).await? {
        bail!("No incident with id {}", id);
    }
    print_success(&format!("Incident {} set to '{}'", id, status), ctx.quiet);
    Ok(())
}

async fn delete(ctx: &Context, _current: &CurrentUser, id: String) -> Result<()> {
    let store = IncidentStore::new(&ctx.db.pool);

    if !store.delete(&id).await? {
        bail!("No incident with id {}", id);
    }
    print_success(&format!("Incident {} deleted", id), ctx.quiet);
    Ok(())
}

async fn stats(ctx: &Context, _current: &CurrentUser) -> Result<()> {
    let store = IncidentStore::new(&ctx.db.pool);

    let rows: Vec<StatsRow> = store
        .count_by_category()
        .await?
        .into_iter()
        .map(|c| StatsRow {
            category: c.category,
            count: c.count,
        })
        .collect();

    print_output(&rows, ctx.format)?;
    Ok(())
}
