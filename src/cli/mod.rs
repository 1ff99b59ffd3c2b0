//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod diff;
mod list;
mod snapshot;

pub use diff::run_diff;
pub use list::{run_list, ListConfig};
pub use snapshot::{run_snapshot, SnapshotConfig};

// Re-export config types used by handlers
pub use crate::config::{AppConfig, DiffConfig};

use crate::config::Validatable;
use crate::error::SyncError;

/// Fail with every validation problem of `config` joined into one error.
pub(crate) fn ensure_valid(config: &impl Validatable) -> Result<(), SyncError> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let message = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(SyncError::validation(message))
}
