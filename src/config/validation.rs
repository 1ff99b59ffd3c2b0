//! Configuration validation for grafana-dashboard-sync.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, DiffConfig, DiffSettings, OutputConfig, ServerConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        for (name, server) in &self.servers {
            if name.trim().is_empty() {
                errors.push(ConfigError::new("servers", "Server names must not be empty"));
            }
            errors.extend(server.validate().into_iter().map(|mut e| {
                e.field = format!("servers.{name}.{}", e.field);
                e
            }));
        }
        errors.extend(self.diff.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for ServerConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            errors.push(ConfigError::new(
                "url",
                format!("URL must start with http:// or https://, got '{}'", self.url),
            ));
        }
        if self.timeout_secs == 0 {
            errors.push(ConfigError::new("timeout_secs", "Timeout must be at least 1 second"));
        }
        if self.bearer.as_deref().is_some_and(|t| t.trim().is_empty()) {
            errors.push(ConfigError::new("bearer", "Bearer token is empty"));
        }
        errors
    }
}

impl Validatable for DiffSettings {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.display_width == 0 {
            errors.push(ConfigError::new(
                "diff.display_width",
                "Display width must be greater than 0",
            ));
        }
        if let Err(e) = self.compile_filter() {
            errors.push(ConfigError::new("diff.dashboard_filter", e.to_string()));
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        // Validate output file path if specified
        if let Some(parent) = self.file.as_deref().and_then(std::path::Path::parent) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                errors.push(ConfigError::new(
                    "output.file",
                    format!("Parent directory does not exist: {}", parent.display()),
                ));
            }
        }

        errors
    }
}

impl Validatable for DiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.left.trim().is_empty() {
            errors.push(ConfigError::new("left", "Source must not be empty"));
        }
        if self.right.trim().is_empty() {
            errors.push(ConfigError::new("right", "Source must not be empty"));
        }
        errors.extend(self.settings.validate());
        errors.extend(self.output.validate());
        errors
    }
}

// ============================================================================
// Tests
// ============================================================================
