//! Session value and guard
//!
//! Authentication state is an explicit value handed to protected operations,
//! not ambient flags mutated from arbitrary call sites. A session starts
//! anonymous and only [`login`](super::service::login) produces an
//! authenticated one.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{Role, User};

/// Per-connection authentication state
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    authenticated: bool,
    username: String,
    role: Role,
}

impl Session {
    /// The default, unauthenticated session
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            username: String::new(),
            role: Role::User,
        }
    }

    pub(crate) fn for_user(user: &User) -> Self {
        Self {
            authenticated: true,
            username: user.username.clone(),
            role: user.role.parse().unwrap_or_default(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}

/// Read-only identity handed to protected operations
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub username: String,
    pub role: Role,
}

/// Gate for protected operations
///
/// Called at the entry of every protected command, before any protected
/// computation runs. The check reads the session only; it never touches
/// stored data.
pub fn require_authenticated(session: &Session) -> Result<CurrentUser> {
    if !session.is_authenticated() {
        return Err(Error::Unauthorized);
    }
    Ok(CurrentUser {
        username: session.username().to_string(),
        role: session.role(),
    })
}
