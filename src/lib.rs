//! **Structural diff of Grafana dashboards and data sources.**
//!
//! `grafana-dashboard-sync` compares the configuration of two Grafana
//! installations (typically production and staging) and reports every
//! observed difference: data sources with a different plugin type, dashboards
//! present on one side only, moved or missing panels, diverging queries and
//! template variables. It detects and reports; it never writes to Grafana.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: read-only documents deserialized from the Grafana HTTP
//!   API, and the [`ConfigSnapshot`] that bundles one server's dashboards and
//!   data sources.
//! - **[`diff`]**: the [`DiffEngine`]. Pure and synchronous: it takes two
//!   snapshots and returns a [`DiffResult`] of ordered [`DiffRecord`]s, unique
//!   keys and diagnostics.
//! - **[`client`]**: blocking HTTP client for the Grafana API. Requires the
//!   `fetch` feature (on by default).
//! - **[`pipeline`]**: resolve sources, run the engine, render and write the
//!   report.
//! - **[`reports`]**: table, summary and JSON renderers.
//! - **[`config`]**: YAML configuration with server definitions.
//!
//! ## Getting Started
//!
//! ```
//! use grafana_dashboard_sync::{DiffEngine, DataSourceRefMode};
//! use grafana_dashboard_sync::model::{ConfigSnapshot, DashboardDocument, Panel, Target};
//!
//! let dashboard = |expr: &str| {
//!     DashboardDocument::new("App Debug", "c0be4e42").with_panels(vec![
//!         Panel::new("Memory usage").with_targets(vec![Target::new("A", expr)]),
//!     ])
//! };
//! let left = ConfigSnapshot::new("prod").with_dashboards(vec![dashboard("count(x)")]);
//! let right = ConfigSnapshot::new("staging").with_dashboards(vec![dashboard("count(y)")]);
//!
//! let result = DiffEngine::new()
//!     .with_datasource_refs(DataSourceRefMode::TypeOnly)
//!     .diff(&left, &right);
//!
//! let dashboards = result.dashboards.expect("dashboards compared");
//! assert_eq!(dashboards.records.len(), 1);
//! assert_eq!(dashboards.records[0].left, "count(x)");
//! ```
//!
//! This documentation is for the library crate. For the command-line tool,
//! see `grafana-dashboard-sync --help`.

pub mod cli;
#[cfg(feature = "fetch")]
pub mod client;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, DiffConfig, ServerConfig};
pub use config::{ConfigError, Validatable};
pub use diff::{
    DashboardKey, DataSourceRefMode, DiffEngine, DiffEngineConfig, DiffKind, DiffRecord,
    DiffResult, Report, VariableCountPolicy,
};
pub use error::{ErrorContext, OptionContext, Result, SyncError};
pub use model::{ConfigSnapshot, DashboardDocument, DataSourceRecord, Panel, Target, Variable};
pub use reports::{ReportFormat, ReportGenerator, ReportType};

#[cfg(feature = "fetch")]
pub use client::GrafanaClient;
