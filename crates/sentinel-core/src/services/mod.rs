//! Business logic services

pub mod import;
pub mod incidents;

pub use import::{import_credentials, import_credentials_file, ImportSummary};
pub use incidents::{CategoryCount, Incident, IncidentStore, NewIncident};
