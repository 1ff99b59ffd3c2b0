//! Pipeline orchestration for diff operations.
//!
//! This module provides shared orchestration logic for the
//! resolve → diff → report workflow, reducing duplication across CLI command
//! handlers.

mod diff_stage;
mod output;
mod report_stage;
mod sources;

pub use diff_stage::compute_diff;
pub use output::{should_use_color, OutputTarget};
pub use report_stage::output_report;
pub use sources::{filter_dashboards, load_source, resolve_sources, SourceSpec};

use crate::error::SyncError;

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to fetch or read one side of the comparison
    #[error("Loading {name} failed: {source}")]
    SourceFailed {
        name: String,
        #[source]
        source: SyncError,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no differences, or differences without --fail-on-change
    pub const SUCCESS: i32 = 0;
    /// Differences were found and --fail-on-change was given
    pub const CHANGES_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 2;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::CHANGES_DETECTED, 1);
        assert_eq!(exit_codes::ERROR, 2);
    }

    #[test]
    fn test_source_failure_names_side() {
        let err = PipelineError::SourceFailed {
            name: "prod".to_string(),
            source: SyncError::unknown_server("prod"),
        };
        assert!(err.to_string().starts_with("Loading prod failed"));
    }
}
