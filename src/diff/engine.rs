//! Diff engine implementation.

use super::changes::{
    DashboardChangeComputer, DataSourceChangeComputer, PanelChangeComputer,
    TargetChangeComputer, VariableChangeComputer,
};
use super::correspond::{normalize_key, Correspondence};
use super::engine_config::{
    DashboardKey, DataSourceRefMode, DiffEngineConfig, ReportType, VariableCountPolicy,
};
use super::{Diagnostic, DiffResult, Report, Scope, Side, SideInfo};
use crate::model::{ConfigSnapshot, DashboardDocument, DataSourceRecord};
use indexmap::IndexSet;
use std::collections::HashMap;

/// Structural diff engine for dashboard and data source collections.
///
/// The engine never fails and has no side effects: malformed input degrades
/// into diagnostics on the returned [`Report`].
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    config: DiffEngineConfig,
    report_type: ReportType,
}

impl DiffEngine {
    /// Create a new diff engine with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a diff engine from a complete configuration
    #[must_use]
    pub fn with_config(mut self, config: DiffEngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the behavior after a variable count mismatch
    #[must_use]
    pub fn with_variable_policy(mut self, policy: VariableCountPolicy) -> Self {
        self.config.variable_policy = policy;
        self
    }

    /// Enable comparison of panel and target data source references
    #[must_use]
    pub fn with_datasource_refs(mut self, mode: DataSourceRefMode) -> Self {
        self.config.datasource_refs = mode;
        self
    }

    /// Pair dashboards by title or by uid
    #[must_use]
    pub fn with_dashboard_key(mut self, key: DashboardKey) -> Self {
        self.config.dashboard_key = key;
        self
    }

    /// Characters kept from long values such as query expressions
    #[must_use]
    pub fn with_display_width(mut self, width: usize) -> Self {
        self.config.display_width = width;
        self
    }

    /// Restrict [`DiffEngine::diff`] to some collections
    #[must_use]
    pub fn with_report_type(mut self, report_type: ReportType) -> Self {
        self.report_type = report_type;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &DiffEngineConfig {
        &self.config
    }

    /// Compare two snapshots and return the diff result
    pub fn diff(&self, left: &ConfigSnapshot, right: &ConfigSnapshot) -> DiffResult {
        let mut result = DiffResult::new(
            SideInfo::from_snapshot(left),
            SideInfo::from_snapshot(right),
        );

        if self.report_type.includes_datasources() {
            result.datasources =
                Some(self.compare_datasource_sets(&left.datasources, &right.datasources));
        }
        if self.report_type.includes_dashboards() {
            result.dashboards =
                Some(self.compare_dashboard_sets(&left.dashboards, &right.dashboards));
        }

        result.calculate_summary();
        result
    }

    /// Compare two dashboard collections.
    ///
    /// Dashboards are paired by the configured [`DashboardKey`]. Records of
    /// each pair are prefixed with the dashboard scope.
    #[must_use]
    pub fn compare_dashboard_sets(
        &self,
        left: &[DashboardDocument],
        right: &[DashboardDocument],
    ) -> Report {
        let key = self.config.dashboard_key;
        let corr = Correspondence::build(left, right, |doc: &&DashboardDocument| key.of(doc));

        let computer = self.dashboard_computer();
        let mut report = Report::new();
        for (one, two) in corr.common.values() {
            let changes = computer.compare_pair(one, two);
            let scope = Scope::Dashboard(normalize_key(&one.title));
            report
                .records
                .extend(changes.records.into_iter().map(|r| r.within(scope.clone())));
            report.diagnostics.extend(
                changes
                    .diagnostics
                    .into_iter()
                    .map(|d| d.within(scope.clone())),
            );
        }

        report.only_left = titles_of(corr.only_left, left, key);
        report.only_right = titles_of(corr.only_right, right, key);
        push_duplicates(&mut report, "dashboard", &corr.duplicates_left, &corr.duplicates_right);
        report
    }

    /// Compare two data source collections by name.
    #[must_use]
    pub fn compare_datasource_sets(
        &self,
        left: &[DataSourceRecord],
        right: &[DataSourceRecord],
    ) -> Report {
        let corr = Correspondence::build(left, right, |ds: &&DataSourceRecord| {
            normalize_key(&ds.name)
        });

        let computer = DataSourceChangeComputer::new();
        let mut report = Report::new();
        report.records = corr
            .common
            .iter()
            .filter_map(|(name, (one, two))| computer.compare_pair(name, one, two))
            .collect();
        report.only_left = into_vec(corr.only_left);
        report.only_right = into_vec(corr.only_right);
        push_duplicates(&mut report, "data source", &corr.duplicates_left, &corr.duplicates_right);
        report
    }

    fn dashboard_computer(&self) -> DashboardChangeComputer {
        let DiffEngineConfig {
            variable_policy,
            datasource_refs,
            display_width,
            ..
        } = self.config;
        DashboardChangeComputer::new(
            VariableChangeComputer::new(variable_policy, display_width),
            PanelChangeComputer::new(
                TargetChangeComputer::new(display_width, datasource_refs),
                datasource_refs,
            ),
        )
    }
}

fn into_vec(keys: IndexSet<String>) -> Vec<String> {
    keys.into_iter().collect()
}

/// Map unique dashboard keys back to the titles of their documents.
///
/// The lookup is built in document order, so a repeated key resolves to the
/// last dashboard carrying it.
fn titles_of(
    keys: IndexSet<String>,
    docs: &[DashboardDocument],
    key: DashboardKey,
) -> Vec<String> {
    if key == DashboardKey::Title {
        return into_vec(keys);
    }
    let titles: HashMap<String, String> = docs
        .iter()
        .map(|doc| (key.of(doc), normalize_key(&doc.title)))
        .collect();
    keys.into_iter()
        .map(|k| titles.get(&k).cloned().unwrap_or(k))
        .collect()
}

fn push_duplicates(
    report: &mut Report,
    what: &str,
    left: &IndexSet<String>,
    right: &IndexSet<String>,
) {
    let left = left.iter().map(|k| Diagnostic::duplicate_key(Side::Left, what, k));
    let right = right.iter().map(|k| Diagnostic::duplicate_key(Side::Right, what, k));
    report.diagnostics.extend(left.chain(right));
}
