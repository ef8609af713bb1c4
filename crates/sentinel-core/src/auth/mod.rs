//! Auth module
//!
//! One credential store behind one workflow, using trait-based dependency
//! injection for testability.
//!
//! ## Structure
//! - `types.rs` - Request data types
//! - `repository.rs` - UserRepository trait and SQLite implementation
//! - `service.rs` - Registration/login/password-change workflow
//! - `session.rs` - Session value and the guard for protected operations

pub mod repository;
pub mod service;
pub mod session;
pub mod types;


// Re-export the workflow operations
pub use service::{change_password, login, register};

// Re-export types for external use
pub use types::{ChangePasswordRequest, LoginRequest, NewUser, RegisterRequest};

// Re-export the store seam and the session guard
pub use repository::{SqliteUserRepository, UserRepository};
pub use session::{require_authenticated, CurrentUser, Session};

use crate::error::Result;

/// Hash a password
///
/// bcrypt draws a fresh random salt per call, so hashing the same password
/// twice yields two different strings that both verify.
pub fn hash_password(password: &str) -> Result<String> {
    Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
}

/// Verify a password against a stored hash
///
/// A malformed stored hash can never match, so decode failures verify as
/// false rather than erroring.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}
