//! List command handler.
//!
//! Prints the dashboards and data sources of one server or snapshot file.

use super::ensure_valid;
use crate::config::AppConfig;
use crate::model::ConfigSnapshot;
use crate::pipeline::{load_source, SourceSpec};
use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

/// Configuration for the list command
#[derive(Debug, Clone, Default)]
pub struct ListConfig {
    /// Server name or snapshot file
    pub source: String,
    /// Only list dashboards whose title matches
    pub dashboard_filter: Option<String>,
    /// Print JSON instead of aligned text
    pub json: bool,
}

/// Run the list command.
pub fn run_list(app: &AppConfig, config: &ListConfig) -> Result<()> {
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

    let output = if config.json {
        serde_json::to_string_pretty(&Listing::from_snapshot(&snapshot))?
    } else {
        render_listing(&snapshot)
    };
    println!("{output}");
    Ok(())
}

#[derive(Serialize)]
struct Listing<'a> {
    server: &'a str,
    dashboards: Vec<DashboardEntry<'a>>,
    datasources: Vec<DataSourceEntry<'a>>,
}

#[derive(Serialize)]
struct DashboardEntry<'a> {
    title: &'a str,
    uid: &'a str,
    panels: usize,
}

#[derive(Serialize)]
struct DataSourceEntry<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
}

impl<'a> Listing<'a> {
    fn from_snapshot(snapshot: &'a ConfigSnapshot) -> Self {
        Self {
            server: &snapshot.server,
            dashboards: snapshot
                .dashboards
                .iter()
                .map(|d| DashboardEntry {
                    title: &d.title,
                    uid: &d.uid,
                    panels: d.panel_count(),
                })
                .collect(),
            datasources: snapshot
                .datasources
                .iter()
                .map(|ds| DataSourceEntry {
                    name: &ds.name,
                    kind: &ds.kind,
                })
                .collect(),
        }
    }
}

fn render_listing(snapshot: &ConfigSnapshot) -> String {
    let mut lines = vec![format!("Dashboards on {}:", snapshot.server)];
    let title_width = column_width(snapshot.dashboards.iter().map(|d| d.title.as_str()), "TITLE");
    let uid_width = column_width(snapshot.dashboards.iter().map(|d| d.uid.as_str()), "UID");
    lines.push(format!(
        "  {}  {}  PANELS",
        pad("TITLE", title_width),
        pad("UID", uid_width)
    ));
    for dashboard in &snapshot.dashboards {
        lines.push(format!(
            "  {}  {}  {}",
            pad(&dashboard.title, title_width),
            pad(&dashboard.uid, uid_width),
            dashboard.panel_count()
        ));
    }

    lines.push(String::new());
    lines.push(format!("Data sources on {}:", snapshot.server));
    let name_width = column_width(snapshot.datasources.iter().map(|d| d.name.as_str()), "NAME");
    lines.push(format!("  {}  TYPE", pad("NAME", name_width)));
    for ds in &snapshot.datasources {
        lines.push(format!("  {}  {}", pad(&ds.name, name_width), ds.kind));
    }
    lines.join("\n")
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values.map(UnicodeWidthStr::width).fold(header.width(), usize::max)
}

/// Left-align `text` in a column of `width` display cells.
fn pad(text: &str, width: usize) -> String {
    format!("{text}{}", " ".repeat(width.saturating_sub(text.width())))
}
