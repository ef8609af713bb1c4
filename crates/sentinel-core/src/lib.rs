//! # sentinel-core
//!
//! Core business logic for Sentinel - shared between the CLI and any future
//! surface.
//!
//! This crate provides:
//! - Database operations (`db` module)
//! - Data models (`models` module)
//! - Authentication: hashing, credential store, workflow and session guard
//!   (`auth` module)
//! - Credential import and incident tracking (`services` module)
//! - Unified error handling (`error` module)

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

// Re-exports for convenience
pub use db::Database;
pub use error::{Error, Result};

// Re-export commonly used types from models
pub use models::{Role, User, UserResponse};

// Re-export the auth surface the application layer depends on
pub use auth::{
    change_password, hash_password, login, register, require_authenticated, verify_password,
    ChangePasswordRequest, CurrentUser, LoginRequest, NewUser, RegisterRequest, Session,
    SqliteUserRepository, UserRepository,
};

// Re-export commonly used types from services
pub use services::{
    import_credentials, import_credentials_file, ImportSummary, Incident, IncidentStore,
    NewIncident,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
pub fn version() -> &'static str {
    VERSION
}
