//! Configuration module for grafana-dashboard-sync.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust
//! use grafana_dashboard_sync::config::{AppConfig, ServerConfig};
//!
//! let config = AppConfig::builder()
//!     .server("prod", ServerConfig::new("https://grafana.example.com").with_bearer("token"))
//!     .build();
//! assert!(config.server("prod").is_ok());
//! ```
//!
//! # Configuration File
//!
//! Place a `.grafana-dashboard-sync.yaml` file in the current directory or
//! `~/.config/grafana-dashboard-sync/`:
//!
//! ```yaml
//! servers:
//!   prod:
//!     url: https://grafana.example.com
//!     bearer: "..."
//! diff:
//!   datasource_refs: type-only
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use crate::diff::{DashboardKey, DataSourceRefMode, VariableCountPolicy};
pub use defaults::{CONFIG_DIR_NAME, CONFIG_FILE_NAMES, DEFAULT_DISPLAY_WIDTH, DEFAULT_TIMEOUT_SECS};
pub use types::{
    AppConfig, AppConfigBuilder, DiffConfig, DiffConfigBuilder, DiffSettings, OutputConfig,
    ServerConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    default_config_path, discover_config_file, generate_example_config,
    generate_full_example_config, load_config_file, load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it to validate and complete configuration files.
pub fn generate_json_schema() -> serde_json::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().expect("schema serializes");
        assert!(schema.contains("\"servers\""));
        assert!(schema.contains("\"dashboard_filter\""));
        assert!(schema.contains("summary-only"));
    }
}
