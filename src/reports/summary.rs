//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{ansi_color, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{DiffResult, Report};

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn section(&self, lines: &mut Vec<String>, heading: &str, report: &Report, result: &DiffResult) {
        lines.push(String::new());
        lines.push(self.color(heading, "bold"));

        if report.is_identical() {
            lines.push(format!("  {}", self.color("Identical", "green")));
        } else {
            let records = report.records.len();
            if records > 0 {
                lines.push(format!(
                    "  {} {}",
                    self.color(&format!("~{records}"), "yellow"),
                    if records == 1 { "difference" } else { "differences" }
                ));
            }
            if !report.only_left.is_empty() {
                lines.push(format!(
                    "  {} only in {}",
                    self.color(&format!("-{}", report.only_left.len()), "red"),
                    result.left.server
                ));
            }
            if !report.only_right.is_empty() {
                lines.push(format!(
                    "  {} only in {}",
                    self.color(&format!("+{}", report.only_right.len()), "green"),
                    result.right.server
                ));
            }
        }

        if !report.diagnostics.is_empty() {
            lines.push(format!(
                "  {} {}",
                self.color(&format!("!{}", report.diagnostics.len()), "dim"),
                if report.diagnostics.len() == 1 { "warning" } else { "warnings" }
            ));
        }
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(&self, result: &DiffResult, config: &ReportConfig) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        // Header
        let title = config.title.as_deref().unwrap_or("Grafana Diff Summary");
        lines.push(self.color(title, "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        lines.push(format!(
            "{}  {} → {}",
            self.color("Servers:", "cyan"),
            result.left.server,
            result.right.server
        ));
        lines.push(format!(
            "{}  {} → {} dashboards, {} → {} data sources",
            self.color("Size:", "cyan"),
            result.left.dashboards,
            result.right.dashboards,
            result.left.datasources,
            result.right.datasources
        ));

        if let Some(report) = &result.datasources {
            self.section(&mut lines, "Data sources:", report, result);
        }
        if let Some(report) = &result.dashboards {
            self.section(&mut lines, "Dashboards:", report, result);
        }

        if !result.summary.by_kind.is_empty() {
            lines.push(String::new());
            lines.push(self.color("By rule:", "bold"));
            for (kind, count) in &result.summary.by_kind {
                lines.push(format!("  {count:>4}  {kind}"));
            }
        }

        lines.push(String::new());
        let total = result.summary.total_changes;
        let verdict = if result.is_identical() {
            self.color("No changes", "green")
        } else {
            self.color(&format!("{total} changes"), "yellow")
        };
        lines.push(format!("{}  {}", self.color("Result:", "cyan"), verdict));

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffEngine;
    use crate::model::{ConfigSnapshot, DataSourceRecord};

    fn result(left: Vec<DataSourceRecord>, right: Vec<DataSourceRecord>) -> DiffResult {
        let left = ConfigSnapshot::new("prod").with_datasources(left);
        let right = ConfigSnapshot::new("staging").with_datasources(right);
        DiffEngine::new().diff(&left, &right)
    }

    #[test]
    fn test_identical_summary() {
        let ds = vec![DataSourceRecord::new("Prometheus", "prometheus")];
        let report = SummaryReporter::new()
            .no_color()
            .generate(&result(ds.clone(), ds), &ReportConfig::default())
            .expect("renders");

        assert!(report.contains("prod → staging"));
        assert!(report.contains("Identical"));
        assert!(report.contains("No changes"));
        assert!(!report.contains('\x1b'));
    }

    #[test]
    fn test_summary_counts() {
        let report = SummaryReporter::new()
            .no_color()
            .generate(
                &result(
                    vec![
                        DataSourceRecord::new("Jaeger", "jaeger"),
                        DataSourceRecord::new("Loki", "loki"),
                    ],
                    vec![DataSourceRecord::new("Jaeger", "tempo")],
                ),
                &ReportConfig::default(),
            )
            .expect("renders");

        assert!(report.contains("~1 difference"));
        assert!(report.contains("-1 only in prod"));
        assert!(report.contains("data source type"));
        assert!(report.contains("2 changes"));
    }
}
