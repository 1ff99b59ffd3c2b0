//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::defaults::{CONFIG_DIR_NAME, CONFIG_FILE_NAMES};
use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/grafana-dashboard-sync/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    let cwd = std::env::current_dir().ok();
    let user_config = dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME));
    let home = dirs::home_dir();

    [cwd, user_config, home]
        .into_iter()
        .flatten()
        .find_map(|dir| find_config_in_dir(&dir))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Where `config init` writes a new file when none exists yet.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAMES[2]))
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
///
/// A file that exists but cannot be parsed is an error: silently falling back
/// to defaults would compare against the wrong servers.
pub fn load_or_default(
    explicit_path: Option<&Path>,
) -> Result<(AppConfig, Option<PathBuf>), ConfigFileError> {
    if let Some(path) = explicit_path {
        if !path.exists() {
            return Err(ConfigFileError::NotFound(path.to_path_buf()));
        }
    }
    match discover_config_file(explicit_path) {
        Some(path) => {
            let config = load_config_file(&path)?;
            tracing::debug!("Loaded configuration from {}", path.display());
            Ok((config, Some(path)))
        }
        None => Ok((AppConfig::default(), None)),
    }
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override, so a CLI layer
    /// built from `AppConfig::default()` keeps file settings it does not set.
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        if other.debug {
            self.debug = true;
        }
        if !other.color {
            self.color = false;
        }
        for (name, server) in &other.servers {
            self.servers.insert(name.clone(), server.clone());
        }

        if other.diff.variable_policy != defaults.diff.variable_policy {
            self.diff.variable_policy = other.diff.variable_policy;
        }
        if other.diff.datasource_refs != defaults.diff.datasource_refs {
            self.diff.datasource_refs = other.diff.datasource_refs;
        }
        if other.diff.dashboard_key != defaults.diff.dashboard_key {
            self.diff.dashboard_key = other.diff.dashboard_key;
        }
        if other.diff.display_width != defaults.diff.display_width {
            self.diff.display_width = other.diff.display_width;
        }
        if other.diff.dashboard_filter.is_some() {
            self.diff
                .dashboard_filter
                .clone_from(&other.diff.dashboard_filter);
        }

        if other.output.format != defaults.output.format {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content from the defaults.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# grafana-dashboard-sync configuration
# Place this file at .grafana-dashboard-sync.yaml in the current directory,
# ~/.config/grafana-dashboard-sync/ or your home directory.

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r#"# grafana-dashboard-sync configuration file
# ==========================================
#
# Place it at:
#   - .grafana-dashboard-sync.yaml in the current directory
#   - ~/.config/grafana-dashboard-sync/grafana-dashboard-sync.yaml
#   - ~/.grafana-dashboard-sync.yaml
#
# CLI arguments always override file settings.

# Log at debug level (RUST_LOG takes precedence)
debug: false
# Colored terminal output (NO_COLOR and --no-color disable it)
color: true

# Grafana servers, referenced by name on the command line
servers:
  prod:
    url: https://grafana.example.com
    # API token, sent as "Authorization: Bearer <token>"
    bearer: "glsa_..."
  staging:
    url: https://grafana-staging.example.com
    bearer: "glsa_..."
    timeout_secs: 10

# Comparison settings
diff:
  # After a variable count mismatch: graceful (keep comparing) or summary-only
  variable_policy: graceful
  # Compare panel/target data source references: off, type-only, strict
  datasource_refs: off
  # Pair dashboards by title or uid
  dashboard_key: title
  # Characters kept from long query expressions
  display_width: 55
  # Only compare dashboards whose title matches
  # dashboard_filter: "^App"

# Output configuration
output:
  # Format: auto, table, summary, json
  format: auto
  # Output file path (omit for stdout)
  # file: diff.json
"#
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DataSourceRefMode, ServerConfig, VariableCountPolicy};
    use crate::reports::ReportFormat;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".grafana-dashboard-sync.yaml");
        std::fs::write(&config_path, "debug: true\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_prefers_first_name() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("grafana-dashboard-sync.yaml"), "").unwrap();
        std::fs::write(tmp.path().join(".grafana-dashboard-sync.yml"), "").unwrap();

        let found = find_config_in_dir(tmp.path()).unwrap();
        assert!(found.ends_with(".grafana-dashboard-sync.yml"));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r#"
debug: true
servers:
  prod:
    url: https://grafana.example.com
    bearer: secret
  staging:
    url: https://staging.example.com
    timeout_secs: 5
diff:
  variable_policy: summary-only
  datasource_refs: type-only
output:
  format: json
"#;
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert!(config.debug);
        assert!(config.color);
        assert_eq!(config.servers.len(), 2);
        assert_eq!(config.servers["prod"].bearer.as_deref(), Some("secret"));
        assert_eq!(config.servers["prod"].timeout_secs, 30);
        assert_eq!(config.servers["staging"].timeout_secs, 5);
        assert_eq!(config.diff.variable_policy, VariableCountPolicy::SummaryOnly);
        assert_eq!(config.diff.datasource_refs, DataSourceRefMode::TypeOnly);
        assert_eq!(config.diff.display_width, 55);
        assert_eq!(config.output.format, ReportFormat::Json);
    }

    #[test]
    fn test_load_empty_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("empty.yaml");
        std::fs::write(&config_path, "\n").unwrap();

        assert_eq!(load_config_file(&config_path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_invalid_yaml() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("bad.yaml");
        std::fs::write(&config_path, "servers: [unclosed").unwrap();

        let result = load_config_file(&config_path);
        assert!(matches!(result, Err(ConfigFileError::Parse(_))));
    }

    #[test]
    fn test_load_or_default_explicit_missing_is_error() {
        let result = load_or_default(Some(Path::new("/nonexistent/config.yaml")));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::builder()
            .server("prod", ServerConfig::new("https://grafana.example.com"))
            .datasource_refs(DataSourceRefMode::Strict)
            .build();
        let overrides = AppConfig::builder()
            .color(false)
            .output_format(ReportFormat::Json)
            .dashboard_filter(Some("^Infra".into()))
            .build();

        base.merge(&overrides);

        assert!(!base.color);
        assert_eq!(base.servers.len(), 1);
        assert_eq!(base.diff.datasource_refs, DataSourceRefMode::Strict);
        assert_eq!(base.diff.dashboard_filter.as_deref(), Some("^Infra"));
        assert_eq!(base.output.format, ReportFormat::Json);
    }

    #[test]
    fn test_generate_example_config() {
        let example = generate_example_config();
        assert!(example.contains("diff:"));
        assert!(example.contains("variable_policy"));
    }

    #[test]
    fn test_full_example_config_parses() {
        let config: AppConfig =
            serde_yaml::from_str(&generate_full_example_config()).expect("valid yaml");
        assert_eq!(config.servers.len(), 2);
        assert_eq!(config.servers["staging"].timeout_secs, 10);
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "debug: false\n").unwrap();

        let discovered = discover_config_file(Some(&config_path));
        assert_eq!(discovered, Some(config_path));
    }
}
