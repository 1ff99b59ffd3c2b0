//! Point-in-time capture of one server's configuration.

use super::{DashboardDocument, DataSourceRecord};
use crate::error::{ErrorContext, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything the diff engine needs from one server: its dashboards and data sources.
///
/// Snapshots are immutable once handed to the engine. They also serve as the
/// on-disk format written by the `snapshot` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// Server name from the configuration file, or the file stem for offline snapshots
    pub server: String,
    pub captured_at: DateTime<Utc>,
    #[serde(default)]
    pub dashboards: Vec<DashboardDocument>,
    #[serde(default)]
    pub datasources: Vec<DataSourceRecord>,
}

impl ConfigSnapshot {
    /// Create an empty snapshot stamped with the current time
    #[must_use]
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            captured_at: Utc::now(),
            dashboards: Vec::new(),
            datasources: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_dashboards(mut self, dashboards: Vec<DashboardDocument>) -> Self {
        self.dashboards = dashboards;
        self
    }

    #[must_use]
    pub fn with_datasources(mut self, datasources: Vec<DataSourceRecord>) -> Self {
        self.datasources = datasources;
        self
    }

    /// Parse a snapshot from its JSON representation.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("parsing configuration snapshot")
    }

    /// Read a snapshot file written by [`ConfigSnapshot::write_to`].
    pub fn read_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::SyncError::io(path, e))?;
        Self::from_json_str(&content).with_context(|| format!("reading {}", path.display()))
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing configuration snapshot")
    }

    /// Write the snapshot to `path` as pretty-printed JSON.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = self.to_json_pretty()?;
        std::fs::write(path, json).map_err(|e| crate::error::SyncError::io(path, e))
    }

    #[must_use]
    pub fn dashboard_count(&self) -> usize {
        self.dashboards.len()
    }

    #[must_use]
    pub fn datasource_count(&self) -> usize {
        self.datasources.len()
    }

    /// Panels across all dashboards, nested ones included
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.dashboards
            .iter()
            .map(DashboardDocument::panel_count)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Panel;

    #[test]
    fn test_snapshot_counts() {
        let snapshot = ConfigSnapshot::new("prod")
            .with_dashboards(vec![
                DashboardDocument::new("A", "a")
                    .with_panels(vec![Panel::new("row").with_children(vec![Panel::new("x")])]),
                DashboardDocument::new("B", "b").with_panels(vec![Panel::new("y")]),
            ])
            .with_datasources(vec![DataSourceRecord::new("Prometheus", "prometheus")]);

        assert_eq!(snapshot.dashboard_count(), 2);
        assert_eq!(snapshot.datasource_count(), 1);
        assert_eq!(snapshot.panel_count(), 3);
    }

    #[test]
    fn test_snapshot_json_round_trip() {
        let snapshot = ConfigSnapshot::new("staging")
            .with_dashboards(vec![DashboardDocument::new("A", "a")])
            .with_datasources(vec![DataSourceRecord::new("Loki", "loki").with_uid("l1")]);

        let json = snapshot.to_json_pretty().expect("serializable");
        let parsed = ConfigSnapshot::from_json_str(&json).expect("parsable");
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_invalid_snapshot_is_parse_error() {
        let err = ConfigSnapshot::from_json_str("{not json").expect_err("must fail");
        assert!(matches!(err, crate::error::SyncError::Parse { .. }));
        assert!(err.to_string().contains("snapshot"));
    }
}
