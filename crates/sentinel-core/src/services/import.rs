//! Bulk credential import
//!
//! Seeds the credential store from a line-oriented file of
//! `username,password_hash[,role]` records, as supplied by an external
//! collaborator. Each line is handled independently: malformed and duplicate
//! lines are skipped with a per-line warning, so a partial import is a normal
//! outcome, not a failure. Storage errors abort the remainder.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use uuid::Uuid;

use crate::auth::{NewUser, UserRepository};
use crate::error::{Error, Result};
use crate::models::Role;

/// Outcome of an import run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

struct ParsedRecord {
    username: String,
    password_hash: String,
    role: Role,
}

/// Parse one `username,password_hash[,role]` record
///
/// Returns None for anything that should be skipped: too few fields, empty
/// username or hash, unrecognized role. A missing role defaults to `user`.
fn parse_record(line: &str) -> Option<ParsedRecord> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() < 2 || parts[0].is_empty() || parts[1].is_empty() {
        return None;
    }

    let role = match parts.get(2) {
        Some(raw) => raw.parse().ok()?,
        None => Role::User,
    };

    Some(ParsedRecord {
        username: parts[0].to_string(),
        password_hash: parts[1].to_string(),
        role,
    })
}

/// Import credentials from a reader
pub async fn import_credentials<R: UserRepository>(
    repo: &R,
    reader: impl BufRead,
) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        let lineno = index + 1;

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some(record) = parse_record(line) else {
            log::warn!("line {}: malformed record, skipping", lineno);
            summary.skipped += 1;
            continue;
        };

        let new_user = NewUser {
            id: Uuid::new_v4().to_string(),
            username: record.username,
            password_hash: record.password_hash,
            role: record.role,
        };

        match repo.insert(new_user).await {
            Ok(user) => {
                log::info!("line {}: imported user '{}'", lineno, user.username);
                summary.imported += 1;
            }
            Err(Error::DuplicateUsername(username)) => {
                log::warn!("line {}: user '{}' already exists, skipping", lineno, username);
                summary.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(summary)
}

/// Import credentials from a file on disk
pub async fn import_credentials_file<R: UserRepository>(
    repo: &R,
    path: &Path,
) -> Result<ImportSummary> {
    let file = File::open(path)?;
    import_credentials(repo, BufReader::new(file)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_minimal() {
        let record = parse_record("alice,$2b$12$hash").unwrap();
        assert_eq!(record.username, "alice");
        assert_eq!(record.password_hash, "$2b$12$hash");
        assert_eq!(record.role, Role::User);
    }

    #[test]
    fn test_parse_record_with_role() {
        let record = parse_record("bob, $2b$12$hash , analyst").unwrap();
        assert_eq!(record.username, "bob");
        assert_eq!(record.role, Role::Analyst);
    }

    #[test]
    fn test_parse_record_malformed() {
        assert!(parse_record("just-a-username").is_none());
        assert!(parse_record(",missing-username").is_none());
        assert!(parse_record("alice,").is_none());
        assert!(parse_record("alice,$2b$12$hash,superuser").is_none());
    }
}
