//! Unified error handling for sentinel-core

use thiserror::Error;

/// Core error type for sentinel-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Username '{0}' already exists")]
    DuplicateUsername(String),

    // One message for unknown usernames and wrong passwords, so the error
    // cannot be used to probe which usernames exist.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("You must be logged in to perform this action")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for sentinel-core
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::validation("Passwords do not match");
        assert_eq!(err.to_string(), "Validation error: Passwords do not match");
    }

    #[test]
    fn test_credential_errors_share_one_message() {
        // UserNotFound and IncorrectPassword collapse into a single variant
        let err = Error::InvalidCredentials;
        assert_eq!(err.to_string(), "Invalid username or password");
    }

    #[test]
    fn test_duplicate_username_names_the_user() {
        let err = Error::DuplicateUsername("alice".to_string());
        assert_eq!(err.to_string(), "Username 'alice' already exists");
    }
}
