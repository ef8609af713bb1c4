//! Auth workflow
//!
//! Registration, login and password change. Stateless per request and
//! independent of any particular surface; the CLI and tests both drive it
//! through the [`UserRepository`] seam.

use uuid::Uuid;

use super::repository::UserRepository;
use super::session::Session;
use super::types::{ChangePasswordRequest, LoginRequest, NewUser, RegisterRequest};
use crate::error::{Error, Result};
use crate::models::UserResponse;

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 8;

/// Register a new user
///
/// Validates, hashes and inserts. Either the record lands with a valid hash
/// or nothing is inserted; a taken username surfaces as
/// [`Error::DuplicateUsername`].
pub async fn register<R: UserRepository>(
    repo: &R,
    request: RegisterRequest,
) -> Result<UserResponse> {
    let username = request.username.trim().to_string();

    if username.is_empty() || request.password.is_empty() {
        return Err(Error::validation("Please fill in all fields"));
    }
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(Error::validation(format!(
            "Username must be at least {} characters long",
            MIN_USERNAME_LEN
        )));
    }
    validate_password(&request.password)?;
    if request.password != request.confirm_password {
        return Err(Error::validation("Passwords do not match"));
    }

    let password_hash = hash_blocking(request.password).await?;

    let user = repo
        .insert(NewUser {
            id: Uuid::new_v4().to_string(),
            username,
            password_hash,
            role: request.role,
        })
        .await?;

    Ok(UserResponse::from(user))
}

/// Authenticate and establish a session
pub async fn login<R: UserRepository>(repo: &R, request: LoginRequest) -> Result<Session> {
    let user = repo
        .find_by_username(request.username.trim())
        .await?
        .ok_or(Error::InvalidCredentials)?;

    let valid = verify_blocking(request.password, user.password_hash.clone()).await?;
    if !valid {
        return Err(Error::InvalidCredentials);
    }

    Ok(Session::for_user(&user))
}

/// Change a user's password
///
/// The current password is re-verified before the stored hash is replaced.
pub async fn change_password<R: UserRepository>(
    repo: &R,
    request: ChangePasswordRequest,
) -> Result<()> {
    let user = repo
        .find_by_username(request.username.trim())
        .await?
        .ok_or(Error::InvalidCredentials)?;

    let valid = verify_blocking(request.current_password, user.password_hash.clone()).await?;
    if !valid {
        return Err(Error::InvalidCredentials);
    }

    validate_password(&request.new_password)?;

    let password_hash = hash_blocking(request.new_password).await?;
    repo.update_password_hash(&user.username, &password_hash)
        .await
}

fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::validation(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

// bcrypt is CPU-bound; keep it off the async worker threads.

async fn hash_blocking(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || super::hash_password(&password))
        .await
        .map_err(|e| Error::internal(format!("Hashing task failed: {}", e)))?
}

async fn verify_blocking(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || super::verify_password(&password, &hash))
        .await
        .map_err(|e| Error::internal(format!("Hashing task failed: {}", e)))
}
