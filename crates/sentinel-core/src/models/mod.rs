//! Data models for the Sentinel platform

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User model
///
/// Only the credential store reads and writes this shape; everything outside
/// the `auth` module receives a [`UserResponse`] snapshot instead, so the
/// password hash never leaves the store.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User snapshot (without the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            role: user.role.parse().unwrap_or_default(),
            username: user.username,
            created_at: user.created_at,
        }
    }
}

/// Account role
///
/// Every write path goes through this enum, so the `role` column only ever
/// holds one of these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Analyst,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Analyst => "analyst",
            Role::Admin => "admin",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "analyst" => Ok(Role::Analyst),
            "admin" => Ok(Role::Admin),
            _ => Err(format!(
                "Invalid role: {}. Use 'user', 'analyst' or 'admin'",
                s
            )),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::User, Role::Analyst, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_role_rejects_unknown() {
        assert!("root".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
        // Lookups are case-sensitive, and so are roles
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_user_response_drops_password_hash() {
        let user = User {
            id: "user-1".to_string(),
            username: "alice".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            role: "analyst".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response = UserResponse::from(user);
        let json = serde_json::to_string(&response).unwrap();

        assert_eq!(response.role, Role::Analyst);
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("secret"));
    }
}
