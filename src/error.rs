//! Unified error types for grafana-dashboard-sync.
//!
//! The comparison engine itself is infallible; these errors cover everything
//! around it: talking to Grafana, reading snapshots and config files, and
//! writing reports.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for grafana-dashboard-sync operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SyncError {
    /// Errors while retrieving configuration from a Grafana server
    #[error("Failed to fetch from Grafana: {context}")]
    Fetch {
        context: String,
        #[source]
        source: FetchErrorKind,
    },

    /// Errors while parsing dashboards, data sources or snapshots
    #[error("Failed to parse configuration: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report { context: String, message: String },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific retrieval error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FetchErrorKind {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Grafana returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Authentication rejected (HTTP {0}); check the bearer token")]
    Unauthorized(u16),

    #[error("Server '{0}' is not defined in the configuration")]
    UnknownServer(String),

    #[error("Retrieval support is not compiled in (enable the `fetch` feature)")]
    Disabled,
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),

    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for grafana-dashboard-sync operations
pub type Result<T> = std::result::Result<T, SyncError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl SyncError {
    /// Create a fetch error with context
    pub fn fetch(context: impl Into<String>, source: FetchErrorKind) -> Self {
        Self::Fetch {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a fetch error for a server missing from the configuration
    pub fn unknown_server(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::fetch(
            format!("resolving server '{name}'"),
            FetchErrorKind::UnknownServer(name),
        )
    }

    /// Create a parse error for an invalid regular expression
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::parse(
            "compiling dashboard filter",
            ParseErrorKind::InvalidPattern {
                pattern: pattern.into(),
                reason: reason.into(),
            },
        )
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a report error
    pub fn report(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Report {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<serde_yaml::Error> for SyncError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::parse(
            "YAML deserialization",
            ParseErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained, so an error raised deep inside snapshot
/// loading reads like `reading prod.json: parsing configuration snapshot: ...`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<SyncError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: SyncError, new_ctx: &str) -> SyncError {
    match err {
        SyncError::Fetch {
            context: existing,
            source,
        } => SyncError::Fetch {
            context: chain_context(new_ctx, &existing),
            source,
        },
        SyncError::Parse {
            context: existing,
            source,
        } => SyncError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        SyncError::Report {
            context: existing,
            message,
        } => SyncError::Report {
            context: chain_context(new_ctx, &existing),
            message,
        },
        SyncError::Io {
            path,
            message,
            source,
        } => SyncError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        SyncError::Config(msg) => SyncError::Config(chain_context(new_ctx, &msg)),
        SyncError::Validation(msg) => SyncError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| SyncError::Validation(context.into()))
    }
}
