//! Destinations for reports and snapshots.
//!
//! Rules shared by every command that prints something:
//! - a file is always plain text, never ANSI colored;
//! - `auto` becomes the bordered table only on an interactive terminal;
//! - file content ends with a newline, as stdout output does;
//! - a closed stdout pipe (`diff ... | head`) is not an error.

use crate::reports::ReportFormat;
use anyhow::{Context, Result};
use std::fmt;
use std::io::{ErrorKind, IsTerminal, Write};
use std::path::PathBuf;

/// Where a command writes its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// `-O/--output-file` if given, stdout otherwise
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }

    /// Stdout attached to a terminal
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stdout) && std::io::stdout().is_terminal()
    }

    /// Concrete format for this destination.
    #[must_use]
    pub fn resolve_format(&self, requested: ReportFormat) -> ReportFormat {
        match requested {
            ReportFormat::Auto if self.is_terminal() => ReportFormat::Table,
            ReportFormat::Auto => ReportFormat::Summary,
            explicit => explicit,
        }
    }

    /// Whether a report for this destination may contain ANSI colors.
    ///
    /// `enabled` is the combined `--no-color` / `color:` setting.
    #[must_use]
    pub fn allows_color(&self, enabled: bool) -> bool {
        enabled && matches!(self, Self::Stdout) && should_use_color(false)
    }

    /// Write `content` followed by a newline.
    pub fn write(&self, content: &str, quiet: bool) -> Result<()> {
        match self {
            Self::Stdout => {
                let mut stdout = std::io::stdout().lock();
                match writeln!(stdout, "{content}").and_then(|()| stdout.flush()) {
                    Err(err) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
                    other => other.context("Failed to write to stdout"),
                }
            }
            Self::File(path) => {
                let mut text = String::with_capacity(content.len() + 1);
                text.push_str(content);
                if !text.ends_with('\n') {
                    text.push('\n');
                }
                std::fs::write(path, &text)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                if !quiet {
                    tracing::info!("Wrote {} bytes to {}", text.len(), path.display());
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Colors unless `--no-color` was given or `NO_COLOR` is set to a
/// non-empty value.
#[must_use]
pub fn should_use_color(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var_os("NO_COLOR").map_or(true, |v| v.is_empty())
}
