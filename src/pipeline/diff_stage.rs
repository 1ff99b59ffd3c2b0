//! Diff computation stage.
//!
//! Builds the engine from the configured settings, runs the comparison and
//! surfaces the engine's diagnostics through `tracing`.

use crate::config::DiffConfig;
use crate::diff::{DiffEngine, DiffResult};
use crate::model::ConfigSnapshot;

/// Run the core diff computation between two snapshots.
pub fn compute_diff(
    config: &DiffConfig,
    left: &ConfigSnapshot,
    right: &ConfigSnapshot,
) -> DiffResult {
    if !config.quiet {
        tracing::info!(
            "Comparing {} ({} dashboards, {} data sources) with {} ({} dashboards, {} data sources)",
            left.server,
            left.dashboard_count(),
            left.datasource_count(),
            right.server,
            right.dashboard_count(),
            right.datasource_count()
        );
    }

    let engine = DiffEngine::new()
        .with_config(config.settings.engine_config())
        .with_report_type(config.report_type);
    let result = engine.diff(left, right);

    for diagnostic in result.diagnostics() {
        let server = match diagnostic.side {
            crate::diff::Side::Left => &left.server,
            crate::diff::Side::Right => &right.server,
        };
        let scope = diagnostic
            .scope
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        tracing::warn!(server = %server, scope = %scope, "{}", diagnostic.message);
    }

    if !config.quiet {
        if result.is_identical() {
            tracing::info!("{} and {} are identical", left.server, right.server);
        } else {
            tracing::info!("Found {} differences", result.summary.total_changes);
        }
    }

    result
}
