//! Resolution of diff sources into configuration snapshots.
//!
//! A source is either the name of a server from the configuration file or the
//! path of a snapshot file written by the `snapshot` command.

use super::PipelineError;
use crate::config::AppConfig;
use crate::error::{Result, SyncError};
use crate::model::ConfigSnapshot;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Where one side of a comparison comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// Named server from the configuration file
    Server(String),
    /// Snapshot JSON file
    File(PathBuf),
}

impl SourceSpec {
    /// Interpret a command-line source.
    ///
    /// Configured server names win over paths. Anything else that exists on
    /// disk or ends in `.json` is a snapshot file; the rest are treated as
    /// server names and fail later as unknown servers.
    pub fn parse(raw: &str, config: &AppConfig) -> Self {
        if config.servers.contains_key(raw) {
            return Self::Server(raw.to_string());
        }
        let path = Path::new(raw);
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json || path.is_file() {
            Self::File(path.to_path_buf())
        } else {
            Self::Server(raw.to_string())
        }
    }

    /// Human-readable name for logs and report headers
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Server(name) => name.clone(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// Load one source, restricting dashboards to titles matching `filter`.
pub fn load_source(
    spec: &SourceSpec,
    config: &AppConfig,
    filter: Option<&Regex>,
) -> Result<ConfigSnapshot> {
    match spec {
        SourceSpec::Server(name) => {
            let server = config.server(name)?;
            fetch(name, server, filter)
        }
        SourceSpec::File(path) => {
            tracing::debug!("Reading snapshot {}", path.display());
            let mut snapshot = ConfigSnapshot::read_from(path)?;
            if snapshot.server.is_empty() {
                snapshot.server = path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_default();
            }
            Ok(filter_dashboards(snapshot, filter))
        }
    }
}

#[cfg(feature = "fetch")]
fn fetch(
    name: &str,
    server: &crate::config::ServerConfig,
    filter: Option<&Regex>,
) -> Result<ConfigSnapshot> {
    crate::client::GrafanaClient::for_server(name, server)?.fetch_snapshot(filter)
}

#[cfg(not(feature = "fetch"))]
fn fetch(
    name: &str,
    _server: &crate::config::ServerConfig,
    _filter: Option<&Regex>,
) -> Result<ConfigSnapshot> {
    Err(SyncError::fetch(
        format!("fetching from '{name}'"),
        crate::error::FetchErrorKind::Disabled,
    ))
}

/// Keep only dashboards whose title matches `filter`.
#[must_use]
pub fn filter_dashboards(mut snapshot: ConfigSnapshot, filter: Option<&Regex>) -> ConfigSnapshot {
    if let Some(re) = filter {
        snapshot.dashboards.retain(|d| re.is_match(&d.title));
    }
    snapshot
}

/// Load both sides of a comparison concurrently.
pub fn resolve_sources(
    left: &SourceSpec,
    right: &SourceSpec,
    config: &AppConfig,
    filter: Option<&Regex>,
) -> std::result::Result<(ConfigSnapshot, ConfigSnapshot), PipelineError> {
    let (one, two) = rayon::join(
        || load_source(left, config, filter),
        || load_source(right, config, filter),
    );
    Ok((
        one.map_err(source_failed(left))?,
        two.map_err(source_failed(right))?,
    ))
}

fn source_failed(spec: &SourceSpec) -> impl FnOnce(SyncError) -> PipelineError {
    let name = spec.label();
    move |source| PipelineError::SourceFailed { name, source }
}
