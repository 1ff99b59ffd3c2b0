//! Snapshot command handler.
//!
//! Captures the configuration of one server into a JSON file that `diff`
//! accepts in place of a server name.

use super::ensure_valid;
use crate::config::AppConfig;
use crate::pipeline::{load_source, OutputTarget, SourceSpec};
use anyhow::{Context, Result};
use regex::Regex;
use std::path::PathBuf;

/// Configuration for the snapshot command
#[derive(Debug, Clone, Default)]
pub struct SnapshotConfig {
    /// Server name (or an existing snapshot to re-filter)
    pub source: String,
    /// Output file (stdout if None)
    pub output_file: Option<PathBuf>,
    /// Only capture dashboards whose title matches
    pub dashboard_filter: Option<String>,
    /// Suppress non-essential output
    pub quiet: bool,
}

/// Run the snapshot command.
pub fn run_snapshot(app: &AppConfig, config: SnapshotConfig) -> Result<()> {
    ensure_valid(app)?;
    let filter = config
        .dashboard_filter
        .as_deref()
        .map(Regex::new)
        .transpose()
        .context("invalid --dashboard pattern")?;

    let spec = SourceSpec::parse(&config.source, app);
    let snapshot = load_source(&spec, app, filter.as_ref())
        .with_context(|| format!("failed to load {}", spec.label()))?;

    if !config.quiet {
        tracing::info!(
            "Captured {} dashboards ({} panels) and {} data sources from {}",
            snapshot.dashboard_count(),
            snapshot.panel_count(),
            snapshot.datasource_count(),
            snapshot.server
        );
    }

    let json = snapshot.to_json_pretty()?;
    OutputTarget::from_option(config.output_file).write(&json, config.quiet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConfigSnapshot, DashboardDocument};

    #[test]
    fn test_refilter_existing_snapshot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("prod.json");
        let output = dir.path().join("app-only.json");
        ConfigSnapshot::new("prod")
            .with_dashboards(vec![
                DashboardDocument::new("App Debug", "a"),
                DashboardDocument::new("Infra", "b"),
            ])
            .write_to(&input)
            .expect("snapshot written");

        run_snapshot(
            &AppConfig::default(),
            SnapshotConfig {
                source: input.display().to_string(),
                output_file: Some(output.clone()),
                dashboard_filter: Some("^App".to_string()),
                quiet: true,
            },
        )
        .expect("snapshot runs");

        let written = ConfigSnapshot::read_from(&output).expect("readable");
        assert_eq!(written.server, "prod");
        assert_eq!(written.dashboard_count(), 1);
        assert_eq!(written.dashboards[0].title, "App Debug");
    }
}
