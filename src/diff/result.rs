//! Diff result structures.

use super::{Diagnostic, DiffKind, DiffRecord};
use crate::model::ConfigSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of comparing one named collection (dashboards or data sources).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Differences between entities present on both sides, in left-side order
    pub records: Vec<DiffRecord>,
    /// Keys present only on the left
    pub only_left: Vec<String>,
    /// Keys present only on the right
    pub only_right: Vec<String>,
    /// Degraded-input notices; never counted as differences
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when there are no records and no unique keys on either side.
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.records.is_empty() && self.only_left.is_empty() && self.only_right.is_empty()
    }

    /// Number of records plus unique keys
    #[must_use]
    pub fn change_count(&self) -> usize {
        self.records.len() + self.only_left.len() + self.only_right.len()
    }

    /// Records produced by one comparison rule
    pub fn records_of(&self, kind: DiffKind) -> impl Iterator<Item = &DiffRecord> {
        self.records.iter().filter(move |r| r.kind == kind)
    }
}

/// Identification of one compared side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideInfo {
    pub server: String,
    pub captured_at: DateTime<Utc>,
    pub dashboards: usize,
    pub datasources: usize,
}

impl SideInfo {
    #[must_use]
    pub fn from_snapshot(snapshot: &ConfigSnapshot) -> Self {
        Self {
            server: snapshot.server.clone(),
            captured_at: snapshot.captured_at,
            dashboards: snapshot.dashboard_count(),
            datasources: snapshot.datasource_count(),
        }
    }
}

/// Complete result of comparing two configuration snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct DiffResult {
    pub left: SideInfo,
    pub right: SideInfo,
    /// Summary statistics
    pub summary: DiffSummary,
    /// Data source comparison, absent when not requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasources: Option<Report>,
    /// Dashboard comparison, absent when not requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboards: Option<Report>,
}

impl DiffResult {
    /// Create a result without any comparison sections
    pub fn new(left: SideInfo, right: SideInfo) -> Self {
        Self {
            left,
            right,
            summary: DiffSummary::default(),
            datasources: None,
            dashboards: None,
        }
    }

    /// Calculate and update summary statistics
    pub fn calculate_summary(&mut self) {
        let mut summary = DiffSummary::default();
        if let Some(report) = &self.datasources {
            summary.datasource_records = report.records.len();
            summary.datasources_only_left = report.only_left.len();
            summary.datasources_only_right = report.only_right.len();
            summary.diagnostics += report.diagnostics.len();
            summary.count_kinds(&report.records);
        }
        if let Some(report) = &self.dashboards {
            summary.dashboard_records = report.records.len();
            summary.dashboards_only_left = report.only_left.len();
            summary.dashboards_only_right = report.only_right.len();
            summary.diagnostics += report.diagnostics.len();
            summary.count_kinds(&report.records);
        }
        summary.total_changes = self.sections().map(Report::change_count).sum();
        self.summary = summary;
    }

    fn sections(&self) -> impl Iterator<Item = &Report> {
        self.datasources.iter().chain(self.dashboards.iter())
    }

    /// Check if there are any differences
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.is_identical()
    }

    /// True when every compared section is identical
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.sections().all(Report::is_identical)
    }

    /// All diagnostics of all sections
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.sections().flat_map(|r| r.diagnostics.iter())
    }
}

/// Summary statistics for the diff
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    /// Records plus unique keys across all sections
    pub total_changes: usize,
    pub datasource_records: usize,
    pub datasources_only_left: usize,
    pub datasources_only_right: usize,
    pub dashboard_records: usize,
    pub dashboards_only_left: usize,
    pub dashboards_only_right: usize,
    pub diagnostics: usize,
    /// Record count per comparison rule
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub by_kind: BTreeMap<String, usize>,
}

impl DiffSummary {
    fn count_kinds(&mut self, records: &[DiffRecord]) {
        for record in records {
            *self
                .by_kind
                .entry(record.kind.name().to_string())
                .or_default() += 1;
        }
    }
}
