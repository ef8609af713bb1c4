//! CLI command modules

pub mod account;
pub mod incident;

use crate::output::OutputFormat;
use sentinel_core::Database;

/// Shared context for command execution
pub struct Context {
    pub db: Database,
    pub format: OutputFormat,
    pub quiet: bool,
}
