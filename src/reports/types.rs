//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use crate::diff::ReportType;

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum ReportFormat {
    /// Auto-detect: table if TTY, summary otherwise
    #[default]
    Auto,
    /// Bordered three-column diff table
    Table,
    /// Brief per-section counts
    Summary,
    /// Structured JSON output
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Table => write!(f, "table"),
            Self::Summary => write!(f, "summary"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Which sections to render
    pub report_type: ReportType,
    /// Title for the report
    pub title: Option<String>,
    /// Additional metadata to include
    pub metadata: ReportMetadata,
}

impl ReportConfig {
    /// Create a config rendering the given sections
    #[must_use]
    pub fn for_type(report_type: ReportType) -> Self {
        Self {
            report_type,
            title: None,
            metadata: ReportMetadata::new(),
        }
    }

    /// Attach the source descriptions shown in headers
    #[must_use]
    pub fn with_sources(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.metadata.left_source = Some(left.into());
        self.metadata.right_source = Some(right.into());
        self
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Left source as given on the command line
    pub left_source: Option<String>,
    /// Right source as given on the command line
    pub right_source: Option<String>,
    /// Tool version
    pub tool_version: String,
}

impl ReportMetadata {
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        }
    }
}
