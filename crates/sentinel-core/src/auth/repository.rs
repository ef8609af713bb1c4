//! User repository
//!
//! Abstracts database operations for testability using trait-based dependency
//! injection. The store is the sole owner of user records; callers get
//! snapshots.

use async_trait::async_trait;
use chrono::Utc;

use super::types::NewUser;
use crate::error::{Error, Result};
use crate::models::User;

/// User repository trait - abstracts credential store operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user
    ///
    /// Fails with [`Error::DuplicateUsername`] when the username is taken.
    /// The decision is made by the storage layer's uniqueness constraint,
    /// never by a check-then-insert, so concurrent inserts of the same
    /// username yield exactly one success.
    async fn insert(&self, user: NewUser) -> Result<User>;

    /// Find user by username (read-only, no side effects)
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Check if username exists
    async fn exists(&self, username: &str) -> Result<bool>;

    /// Replace the password hash for the named user
    async fn update_password_hash(&self, username: &str, password_hash: &str) -> Result<()>;
}

/// SQLite implementation of UserRepository
pub struct SqliteUserRepository<'a> {
    pool: &'a sqlx::SqlitePool,
}

impl<'a> SqliteUserRepository<'a> {
    pub fn new(pool: &'a sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl<'a> UserRepository for SqliteUserRepository<'a> {
    async fn insert(&self, user: NewUser) -> Result<User> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, role, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Error::DuplicateUsername(user.username.clone())
            }
            _ => Error::Database(e),
        })?;

        self.find_by_username(&user.username)
            .await?
            .ok_or_else(|| Error::internal("Failed to fetch created user"))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    async fn exists(&self, username: &str) -> Result<bool> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(self.pool)
            .await?;
        Ok(count.0 > 0)
    }

    async fn update_password_hash(&self, username: &str, password_hash: &str) -> Result<()> {
        let result =
            sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE username = ?")
                .bind(password_hash)
                .bind(Utc::now())
                .bind(username)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found(format!("User '{}'", username)));
        }
        Ok(())
    }
}
