//! Configuration types for grafana-dashboard-sync operations.
//!
//! Provides the file-level [`AppConfig`] and the resolved per-command
//! [`DiffConfig`].

use super::defaults::{DEFAULT_DISPLAY_WIDTH, DEFAULT_TIMEOUT_SECS};
use crate::diff::{
    DashboardKey, DataSourceRefMode, DiffEngineConfig, ReportType, VariableCountPolicy,
};
use crate::error::{Result, SyncError};
use crate::reports::ReportFormat;
use indexmap::IndexMap;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are merged over file settings with [`AppConfig::merge`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Log at debug level
    pub debug: bool,
    /// Colored terminal output
    pub color: bool,
    /// Grafana servers by name
    pub servers: IndexMap<String, ServerConfig>,
    /// Comparison settings
    pub diff: DiffSettings,
    /// Output settings
    pub output: OutputConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            debug: false,
            color: true,
            servers: IndexMap::new(),
            diff: DiffSettings::default(),
            output: OutputConfig::default(),
        }
    }
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Look up a server by name.
    pub fn server(&self, name: &str) -> Result<&ServerConfig> {
        self.servers
            .get(name)
            .ok_or_else(|| SyncError::unknown_server(name))
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Add or replace a named server.
    pub fn server(mut self, name: impl Into<String>, server: ServerConfig) -> Self {
        self.config.servers.insert(name.into(), server);
        self
    }

    pub const fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    pub const fn color(mut self, color: bool) -> Self {
        self.config.color = color;
        self
    }

    pub const fn variable_policy(mut self, policy: VariableCountPolicy) -> Self {
        self.config.diff.variable_policy = policy;
        self
    }

    pub const fn datasource_refs(mut self, mode: DataSourceRefMode) -> Self {
        self.config.diff.datasource_refs = mode;
        self
    }

    pub const fn dashboard_key(mut self, key: DashboardKey) -> Self {
        self.config.diff.dashboard_key = key;
        self
    }

    pub fn dashboard_filter(mut self, pattern: Option<String>) -> Self {
        self.config.diff.dashboard_filter = pattern;
        self
    }

    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Connection settings of one Grafana server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ServerConfig {
    /// Base URL, e.g. `https://grafana.example.com`
    pub url: String,
    /// API token sent as `Authorization: Bearer <token>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    #[schemars(range(min = 1))]
    pub timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ServerConfig {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            bearer: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    #[must_use]
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// The base URL without trailing slashes
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// Comparison settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DiffSettings {
    /// Behavior after a variable count mismatch
    pub variable_policy: VariableCountPolicy,
    /// Comparison of panel and target data source references
    pub datasource_refs: DataSourceRefMode,
    /// How dashboards are paired across servers
    pub dashboard_key: DashboardKey,
    /// Characters kept from long values in reports
    #[schemars(range(min = 1))]
    pub display_width: usize,
    /// Only compare dashboards whose title matches this regular expression
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard_filter: Option<String>,
}

impl Default for DiffSettings {
    fn default() -> Self {
        Self {
            variable_policy: VariableCountPolicy::default(),
            datasource_refs: DataSourceRefMode::default(),
            dashboard_key: DashboardKey::default(),
            display_width: DEFAULT_DISPLAY_WIDTH,
            dashboard_filter: None,
        }
    }
}

impl DiffSettings {
    /// Engine settings derived from this configuration
    #[must_use]
    pub const fn engine_config(&self) -> DiffEngineConfig {
        DiffEngineConfig {
            variable_policy: self.variable_policy,
            datasource_refs: self.datasource_refs,
            dashboard_key: self.dashboard_key,
            display_width: self.display_width,
        }
    }

    /// Compile the dashboard title filter, if any.
    pub fn compile_filter(&self) -> Result<Option<Regex>> {
        self.dashboard_filter
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| SyncError::invalid_pattern(pattern, e.to_string()))
            })
            .transpose()
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

// ============================================================================
// Per-command Configuration
// ============================================================================

/// Configuration for diff operations
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Server name or snapshot file for the left side
    pub left: String,
    /// Server name or snapshot file for the right side
    pub right: String,
    /// Comparison settings
    pub settings: DiffSettings,
    /// Output configuration
    pub output: OutputConfig,
    /// Collections to compare
    pub report_type: ReportType,
    /// Exit with code 1 when differences are found
    pub fail_on_change: bool,
    /// Suppress non-essential output
    pub quiet: bool,
    /// Colored terminal output
    pub color: bool,
}

/// Builder for `DiffConfig`
#[derive(Debug, Default)]
pub struct DiffConfigBuilder {
    left: Option<String>,
    right: Option<String>,
    settings: DiffSettings,
    output: OutputConfig,
    report_type: ReportType,
    fail_on_change: bool,
    quiet: bool,
    color: bool,
}

impl DiffConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            color: true,
            ..Self::default()
        }
    }

    /// Start from the settings of a loaded configuration file.
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            settings: config.diff.clone(),
            output: config.output.clone(),
            color: config.color,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn left(mut self, source: impl Into<String>) -> Self {
        self.left = Some(source.into());
        self
    }

    #[must_use]
    pub fn right(mut self, source: impl Into<String>) -> Self {
        self.right = Some(source.into());
        self
    }

    #[must_use]
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.output.format = format;
        self
    }

    #[must_use]
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        if file.is_some() {
            self.output.file = file;
        }
        self
    }

    #[must_use]
    pub const fn report_type(mut self, report_type: ReportType) -> Self {
        self.report_type = report_type;
        self
    }

    #[must_use]
    pub fn dashboard_filter(mut self, pattern: Option<String>) -> Self {
        if pattern.is_some() {
            self.settings.dashboard_filter = pattern;
        }
        self
    }

    #[must_use]
    pub fn variable_policy(mut self, policy: Option<VariableCountPolicy>) -> Self {
        if let Some(policy) = policy {
            self.settings.variable_policy = policy;
        }
        self
    }

    #[must_use]
    pub fn datasource_refs(mut self, mode: Option<DataSourceRefMode>) -> Self {
        if let Some(mode) = mode {
            self.settings.datasource_refs = mode;
        }
        self
    }

    #[must_use]
    pub fn dashboard_key(mut self, key: Option<DashboardKey>) -> Self {
        if let Some(key) = key {
            self.settings.dashboard_key = key;
        }
        self
    }

    #[must_use]
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.fail_on_change = fail;
        self
    }

    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    #[must_use]
    pub const fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn build(self) -> anyhow::Result<DiffConfig> {
        let left = self
            .left
            .ok_or_else(|| anyhow::anyhow!("left source is required"))?;
        let right = self
            .right
            .ok_or_else(|| anyhow::anyhow!("right source is required"))?;

        Ok(DiffConfig {
            left,
            right,
            settings: self.settings,
            output: self.output,
            report_type: self.report_type,
            fail_on_change: self.fail_on_change,
            quiet: self.quiet,
            color: self.color,
        })
    }
}
