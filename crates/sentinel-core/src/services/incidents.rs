//! Incident store
//!
//! CRUD over security incidents, the protected resource behind the session
//! guard. Callers reach this only through a [`CurrentUser`] produced by
//! `require_authenticated`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::error::{Error, Result};

/// Security incident model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Incident {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub severity: String,
    pub category: String,
    pub status: String,
    pub description: String,
    pub reported_by: String,
}

/// Data for reporting a new incident
#[derive(Debug, Clone, Deserialize)]
pub struct NewIncident {
    pub severity: String,
    pub category: String,
    pub description: String,
}

/// Per-category incident count
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// SQLite-backed incident store
pub struct IncidentStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> IncidentStore<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Report a new incident, attributed to the authenticated user
    pub async fn report(&self, reporter: &CurrentUser, incident: NewIncident) -> Result<Incident> {
        if incident.severity.trim().is_empty()
            || incident.category.trim().is_empty()
            || incident.description.trim().is_empty()
        {
            return Err(Error::validation(
                "Severity, category and description are required",
            ));
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO cyber_incidents (id, timestamp, severity, category, status, description, reported_by)
            VALUES (?, ?, ?, ?, 'Open', ?, ?)
            "#,
        )
        .bind(&id)
        .bind(now)
        .bind(incident.severity.trim())
        .bind(incident.category.trim())
        .bind(incident.description.trim())
        .bind(&reporter.username)
        .execute(self.pool)
        .await?;

        self.find_by_id(&id)
            .await?
            .ok_or_else(|| Error::internal("Failed to fetch created incident"))
    }

    /// Find incident by id
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Incident>> {
        let incident = sqlx::query_as("SELECT * FROM cyber_incidents WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(incident)
    }

    /// List all incidents, newest first
    pub async fn list(&self) -> Result<Vec<Incident>> {
        let incidents = sqlx::query_as("SELECT * FROM cyber_incidents ORDER BY timestamp DESC")
            .fetch_all(self.pool)
            .await?;
        Ok(incidents)
    }

    /// List incidents with a given severity, newest first
    pub async fn list_by_severity(&self, severity: &str) -> Result<Vec<Incident>> {
        let incidents = sqlx::query_as(
            "SELECT * FROM cyber_incidents WHERE severity = ? ORDER BY timestamp DESC",
        )
        .bind(severity)
        .fetch_all(self.pool)
        .await?;
        Ok(incidents)
    }

    /// Update the status of an incident; returns false when the id is unknown
    pub async fn update_status(&self, id: &str, status: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE cyber_incidents SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an incident; returns false when the id is unknown
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cyber_incidents WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Incident counts per category, largest first
    pub async fn count_by_category(&self) -> Result<Vec<CategoryCount>> {
        let counts = sqlx::query_as(
            r#"
            SELECT category, COUNT(*) as count
            FROM cyber_incidents
            GROUP BY category
            ORDER BY count DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;
        Ok(counts)
    }
}
