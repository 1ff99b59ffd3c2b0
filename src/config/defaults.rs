//! Default values for grafana-dashboard-sync configuration.

/// Default HTTP request timeout for Grafana servers, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of characters kept from long values in diff records.
pub const DEFAULT_DISPLAY_WIDTH: usize = crate::diff::DEFAULT_DISPLAY_WIDTH;

/// Directory name below the user config directory.
pub const CONFIG_DIR_NAME: &str = "grafana-dashboard-sync";

/// Standard config file names to search for, in order of preference.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".grafana-dashboard-sync.yaml",
    ".grafana-dashboard-sync.yml",
    "grafana-dashboard-sync.yaml",
];
