//! Report output stage.
//!
//! Handles generating and writing diff reports.

use crate::config::DiffConfig;
use crate::diff::DiffResult;
use crate::reports::{create_reporter_with_options, ReportConfig};
use anyhow::Result;

use super::OutputTarget;

/// Output a diff report to the configured destination.
///
/// Resolves the `auto` format against the output target; files never get
/// ANSI colors.
pub fn output_report(config: &DiffConfig, result: &DiffResult) -> Result<()> {
    let target = OutputTarget::from_option(config.output.file.clone());
    let format = target.resolve_format(config.output.format);
    tracing::debug!("Writing {} report to {}", format, target);

    let report_config =
        ReportConfig::for_type(config.report_type).with_sources(&config.left, &config.right);
    let reporter = create_reporter_with_options(format, target.allows_color(config.color));
    let report = reporter.generate(result, &report_config)?;

    target.write(&report, config.quiet)
}
