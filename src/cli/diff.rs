//! Diff command handler.
//!
//! Implements the `diff` subcommand for comparing two Grafana configurations.

use super::ensure_valid;
use crate::config::{AppConfig, DiffConfig};
use crate::diff::DiffResult;
use crate::pipeline::{
    compute_diff, exit_codes, output_report, resolve_sources, PipelineError, SourceSpec,
};
use anyhow::Result;

/// Run the diff command, returning the desired exit code.
///
/// Each side is a server from `app` or a snapshot file. The caller is
/// responsible for calling `std::process::exit()` with the returned code when
/// it is non-zero.
pub fn run_diff(app: &AppConfig, config: DiffConfig) -> Result<i32> {
    ensure_valid(&config)?;
    let filter = config.settings.compile_filter()?;

    let left = SourceSpec::parse(&config.left, app);
    let right = SourceSpec::parse(&config.right, app);
    tracing::debug!("Resolved sources: {:?} and {:?}", left, right);

    let (left, right) = resolve_sources(&left, &right, app, filter.as_ref())?;
    let result = compute_diff(&config, &left, &right);
    let exit_code = determine_exit_code(&config, &result);

    output_report(&config, &result).map_err(|source| PipelineError::ReportFailed { source })?;

    Ok(exit_code)
}

/// Determine the appropriate exit code based on diff results and config flags.
fn determine_exit_code(config: &DiffConfig, result: &DiffResult) -> i32 {
    if config.fail_on_change && result.has_changes() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiffConfigBuilder;
    use crate::model::{ConfigSnapshot, DataSourceRecord};
    use crate::reports::ReportFormat;
    use std::path::Path;

    fn write_snapshot(path: &Path, server: &str, kind: &str) {
        ConfigSnapshot::new(server)
            .with_datasources(vec![DataSourceRecord::new("Jaeger", kind)])
            .write_to(path)
            .expect("snapshot written");
    }

    fn config(dir: &Path, left: &Path, right: &Path, fail_on_change: bool) -> DiffConfig {
        DiffConfigBuilder::new()
            .left(left.display().to_string())
            .right(right.display().to_string())
            .output_format(ReportFormat::Json)
            .output_file(Some(dir.join("report.json")))
            .fail_on_change(fail_on_change)
            .quiet(true)
            .build()
            .expect("valid config")
    }

    #[test]
    fn test_exit_code_on_changes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let left = dir.path().join("prod.json");
        let right = dir.path().join("staging.json");
        write_snapshot(&left, "prod", "jaeger");
        write_snapshot(&right, "staging", "tempo");

        let app = AppConfig::default();
        let code = run_diff(&app, config(dir.path(), &left, &right, true)).expect("diff runs");
        assert_eq!(code, exit_codes::CHANGES_DETECTED);

        let code = run_diff(&app, config(dir.path(), &left, &right, false)).expect("diff runs");
        assert_eq!(code, exit_codes::SUCCESS);
        assert!(dir.path().join("report.json").exists());
    }

    #[test]
    fn test_identical_snapshots_succeed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let left = dir.path().join("prod.json");
        let right = dir.path().join("staging.json");
        write_snapshot(&left, "prod", "jaeger");
        write_snapshot(&right, "staging", "jaeger");

        let code = run_diff(&AppConfig::default(), config(dir.path(), &left, &right, true))
            .expect("diff runs");
        assert_eq!(code, exit_codes::SUCCESS);
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        let config = DiffConfigBuilder::new()
            .left("prod.json")
            .right("staging.json")
            .dashboard_filter(Some("[".to_string()))
            .build()
            .expect("builds");
        assert!(run_diff(&AppConfig::default(), config).is_err());
    }
}
